mod dispatch;
mod pattern;
mod route;

pub use dispatch::Completion;
pub use pattern::Pattern;
pub use route::{Kind, Route};

use crate::error::PatternError;
use crate::http::header::REFERER;
use crate::http::{ContentTypes, Parts, RouteMethod};
use crate::transport::Transport;
use crate::{Error, Handler, Next, Request, Response};

use std::io::Read;
use std::sync::Arc;

/// An ordered table of routes and middleware.
///
/// Entries are matched in registration order. The table is built by value
/// and is read-only once serving begins, so a single router can be shared
/// across threads and dispatch many requests concurrently.
pub struct Router {
    routes: Vec<Route>,
    content_types: Arc<ContentTypes>,
}

impl Router {
    pub fn new() -> Self {
        tracing::trace!("router initialized");

        Router {
            routes: Vec::new(),
            content_types: Arc::default(),
        }
    }

    /// Use a custom extension to content type table for `send_file`.
    pub fn with_content_types(mut self, content_types: ContentTypes) -> Self {
        self.content_types = Arc::new(content_types);
        self
    }

    /// Append an entry to the table.
    pub fn register(mut self, route: Route) -> Self {
        tracing::trace!(
            method = %route.method(),
            pattern = ?route.pattern().map(Pattern::as_str),
            kind = ?route.kind(),
            "registered route"
        );

        self.routes.push(route);
        self
    }

    /// Register a handler for `method`. A missing pattern matches every path.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid. See [`try_route`](Router::try_route).
    pub fn route<F>(self, method: RouteMethod, pattern: Option<&str>, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.try_route(method, pattern, handler)
            .expect("failed to insert route")
    }

    pub fn try_route<F>(
        self,
        method: RouteMethod,
        pattern: Option<&str>,
        handler: F,
    ) -> Result<Self, PatternError>
    where
        F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        Ok(self.register(Route::handler(method, pattern, handler)?))
    }

    /// Register middleware for every method. A pattern restricts it to that
    /// path and the paths beneath it.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid. See
    /// [`try_middleware`](Router::try_middleware).
    pub fn middleware<F>(self, pattern: Option<&str>, middleware: F) -> Self
    where
        F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.try_middleware(pattern, middleware)
            .expect("failed to insert route")
    }

    pub fn try_middleware<F>(self, pattern: Option<&str>, middleware: F) -> Result<Self, PatternError>
    where
        F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        Ok(self.register(Route::middleware(pattern, middleware)?))
    }

    /// Register a [`Handler`] value, such as [`BodyParser`](crate::BodyParser),
    /// as middleware.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid. See
    /// [`try_use_handler`](Router::try_use_handler).
    pub fn use_handler<H>(self, pattern: Option<&str>, handler: H) -> Self
    where
        H: Handler,
    {
        self.try_use_handler(pattern, handler)
            .expect("failed to insert route")
    }

    pub fn try_use_handler<H>(self, pattern: Option<&str>, handler: H) -> Result<Self, PatternError>
    where
        H: Handler,
    {
        Ok(self.register(Route::middleware(pattern, handler)?))
    }

    /// The registered entries, in order.
    pub fn entries(&self) -> &[Route] {
        &self.routes
    }

    pub fn content_types(&self) -> &Arc<ContentTypes> {
        &self.content_types
    }

    /// Create the response context for `req`.
    pub fn response_for<T>(&self, req: &Request, transport: T) -> Response
    where
        T: Transport + 'static,
    {
        let referer = req
            .headers()
            .get_ignore_case(REFERER)
            .map(ToOwned::to_owned);

        Response::new(transport, self.content_types.clone(), referer)
    }

    /// Build the request and response contexts and dispatch them.
    pub fn serve<R, T>(&self, parts: Parts, body: R, transport: T) -> Completion
    where
        R: Read + Send + 'static,
        T: Transport + 'static,
    {
        let mut req = Request::new(parts, body);
        let mut res = self.response_for(&req, transport);
        self.dispatch(&mut req, &mut res)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! insert_route {
    ($name:ident => RouteMethod::$method:ident) => {
        #[doc = concat!("Register a handler for `", stringify!($method), "` requests.")]
        pub fn $name<F>(self, pattern: &str, handler: F) -> Self
        where
            F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error>
                + Send
                + Sync
                + 'static,
        {
            self.route(RouteMethod::$method, Some(pattern), handler)
        }
    };
}

impl Router {
    insert_route!(get => RouteMethod::Get);
    insert_route!(post => RouteMethod::Post);
    insert_route!(put => RouteMethod::Put);
    insert_route!(delete => RouteMethod::Delete);
    insert_route!(all => RouteMethod::All);
}
