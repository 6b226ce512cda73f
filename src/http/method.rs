use std::fmt;

use super::Method;

/// The method filter of a registered route.
///
/// `All` is only ever used as a filter; it never appears as the
/// method of an actual request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RouteMethod {
    All,
    Get,
    Post,
    Put,
    Delete,
}

impl RouteMethod {
    /// The string representation of this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::All => "ALL",
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
        }
    }

    /// Returns `true` if a request with the given method passes this filter.
    ///
    /// Comparison is case-insensitive, so an extension method such as
    /// `get` still passes the `Get` filter.
    pub fn matches(self, method: &Method) -> bool {
        match self {
            RouteMethod::All => true,
            filter => filter.as_str().eq_ignore_ascii_case(method.as_str()),
        }
    }
}

impl Default for RouteMethod {
    fn default() -> Self {
        RouteMethod::All
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
