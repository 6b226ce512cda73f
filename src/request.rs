use crate::extract::ParsedBody;
use crate::http::header::CONTENT_TYPE;
use crate::http::{Extensions, Headers, Method, Params, Parts, Uri};

use std::fmt;
use std::io::{self, Read};

use once_cell::sync::OnceCell;

/// An incoming HTTP request, as seen by handlers.
///
/// The method, URL and headers are fixed when the request is created.
/// Route parameters are rebound by the router as entries match, and the
/// parsed body can be attached once by a body-parsing middleware.
pub struct Request {
    method: Method,
    uri: Uri,
    path: String,
    headers: Headers,
    extensions: Extensions,
    params: Params,
    route: Option<String>,
    query: OnceCell<Params>,
    body: OnceCell<ParsedBody>,
    reader: Box<dyn Read + Send>,
}

impl Request {
    /// Create a request from the head of a raw request and a reader
    /// over its payload.
    pub fn new<R>(parts: Parts, body: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let path = match parts.uri.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };

        Request {
            method: parts.method,
            headers: Headers::from(&parts.headers),
            extensions: parts.extensions,
            uri: parts.uri,
            path,
            params: Params::new(),
            route: None,
            query: OnceCell::new(),
            body: OnceCell::new(),
            reader: Box::new(body),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL exactly as it was requested.
    pub fn original_url(&self) -> String {
        self.uri.to_string()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path component of the URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The first value of a header, matched case-sensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The request's `Content-Type`, whatever casing the client used.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get_ignore_case(CONTENT_TYPE)
    }

    /// A route parameter bound by the most recent matching pattern.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The pattern of the most recent matching entry.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// A query string parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params().get(name)
    }

    /// All query string parameters, parsed on first access.
    ///
    /// A query string that fails to parse yields no parameters.
    pub fn query_params(&self) -> &Params {
        self.query.get_or_init(|| match self.uri.query() {
            Some(query) => serde_urlencoded::from_str::<Vec<(String, String)>>(query)
                .map(Params::from)
                .unwrap_or_default(),
            None => Params::new(),
        })
    }

    /// Typed per-request data shared between middleware and handlers.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// The decoded body, if a body parser attached one.
    pub fn body(&self) -> Option<&ParsedBody> {
        self.body.get()
    }

    /// Attach a decoded body.
    ///
    /// The body can only be set once. Returns `false` and leaves the
    /// existing body in place if one was already attached.
    pub fn set_body(&self, body: ParsedBody) -> bool {
        self.body.set(body).is_ok()
    }

    pub(crate) fn bind(&mut self, route: &str, params: Params) {
        self.route = Some(route.to_owned());

        if !params.is_empty() {
            self.params = params;
        }
    }
}

/// Reads the raw request payload. Returns `Ok(0)` once it is exhausted.
impl Read for Request {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .finish()
    }
}
