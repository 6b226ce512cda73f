use super::Pattern;
use crate::error::PatternError;
use crate::http::{Method, Params, RouteMethod};
use crate::Handler;

use std::fmt;

/// Whether a route entry was registered as a handler or as middleware.
///
/// Both kinds are invoked the same way. They differ in how their pattern
/// matches: a handler pattern must match the whole path, a middleware
/// pattern matches the path and everything beneath it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Handler,
    Middleware,
}

/// A registered route entry.
pub struct Route {
    method: RouteMethod,
    pattern: Option<Pattern>,
    kind: Kind,
    handler: Box<dyn Handler>,
}

impl Route {
    /// A handler entry. A missing pattern matches every path.
    pub fn handler<H>(
        method: RouteMethod,
        pattern: Option<&str>,
        handler: H,
    ) -> Result<Route, PatternError>
    where
        H: Handler,
    {
        Route::new(method, pattern, Kind::Handler, handler)
    }

    /// A middleware entry matching every method.
    pub fn middleware<H>(pattern: Option<&str>, handler: H) -> Result<Route, PatternError>
    where
        H: Handler,
    {
        Route::new(RouteMethod::All, pattern, Kind::Middleware, handler)
    }

    fn new<H>(
        method: RouteMethod,
        pattern: Option<&str>,
        kind: Kind,
        handler: H,
    ) -> Result<Route, PatternError>
    where
        H: Handler,
    {
        Ok(Route {
            method,
            pattern: pattern.map(Pattern::parse).transpose()?,
            kind,
            handler: Box::new(handler),
        })
    }

    pub fn method(&self) -> RouteMethod {
        self.method
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn handler_ref(&self) -> &dyn Handler {
        &*self.handler
    }

    /// Match a request against this entry, returning the bound path
    /// parameters.
    pub fn matches(&self, method: &Method, path: &str) -> Option<Params> {
        matches(self.method, self.pattern.as_ref(), self.kind, method, path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Decide whether a request matches a route's method filter and pattern.
pub(crate) fn matches(
    filter: RouteMethod,
    pattern: Option<&Pattern>,
    kind: Kind,
    method: &Method,
    path: &str,
) -> Option<Params> {
    if !filter.matches(method) {
        return None;
    }

    match (pattern, kind) {
        (None, _) => Some(Params::new()),
        (Some(pattern), Kind::Handler) => pattern.at(path),
        (Some(pattern), Kind::Middleware) => pattern.prefix(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Next, Request, Response};

    fn noop(_: &mut Request, _: &mut Response, next: Next<'_>) -> Result<(), Error> {
        next.call();
        Ok(())
    }

    #[test]
    fn missing_pattern_matches_every_path() {
        let route = Route::handler(RouteMethod::Get, None, noop).unwrap();
        assert!(route.matches(&Method::GET, "/").is_some());
        assert!(route.matches(&Method::GET, "/any/thing").is_some());
        assert!(route.matches(&Method::POST, "/").is_none());
    }

    #[test]
    fn handlers_match_exactly() {
        let route = Route::handler(RouteMethod::All, Some("/x"), noop).unwrap();
        assert!(route.matches(&Method::DELETE, "/x").is_some());
        assert!(route.matches(&Method::DELETE, "/x/y").is_none());
    }

    #[test]
    fn middleware_matches_beneath() {
        let route = Route::middleware(Some("/x"), noop).unwrap();
        assert_eq!(route.method(), RouteMethod::All);
        assert_eq!(route.kind(), Kind::Middleware);
        assert!(route.matches(&Method::PUT, "/x").is_some());
        assert!(route.matches(&Method::PUT, "/x/y").is_some());
        assert!(route.matches(&Method::PUT, "/xy").is_none());
    }

    #[test]
    fn invalid_patterns() {
        assert!(Route::handler(RouteMethod::Get, Some("relative"), noop).is_err());
    }
}
