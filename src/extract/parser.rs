use crate::{Error, Handler, Next, Request, Response};

/// Middleware that decodes the request body and attaches it to the request.
///
/// The body is decoded according to the request's `Content-Type` (see
/// [`decode`](super::decode)) and is available to later entries through
/// [`Request::body`]. A body that cannot be decoded is left absent; the
/// chain always continues.
///
/// ```
/// use junction::{BodyParser, Router};
///
/// let router = Router::new()
///     .use_handler(None, BodyParser::new())
///     .post("/echo", |req, res, _next| {
///         let text = req.body().and_then(|body| body.as_text()).unwrap_or("");
///         res.status(200u16).end_with(text.to_owned())?;
///         Ok(())
///     });
/// ```
#[derive(Clone, Debug, Default)]
pub struct BodyParser {
    limit: Option<usize>,
}

impl BodyParser {
    /// Create a body parser with no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of bytes that will be read.
    ///
    /// Bodies larger than the limit are left undecoded.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Handler for BodyParser {
    fn call(&self, req: &mut Request, _: &mut Response, next: Next<'_>) -> Result<(), Error> {
        if req.body().is_none() {
            let content_type = req.content_type().map(ToOwned::to_owned);

            if let Some(body) = super::decode_with_limit(req, content_type.as_deref(), self.limit)
            {
                req.set_body(body);
            }
        }

        next.call();
        Ok(())
    }
}
