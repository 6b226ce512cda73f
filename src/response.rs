use crate::error::SendFileError;
use crate::http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use crate::http::{ContentTypes, Headers, Status};
use crate::transport::Transport;
use crate::Error;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bytes::BytesMut;

/// The outgoing response of a single request.
///
/// Output is buffered until [`end`](Response::end) flushes it through the
/// transport. Once ended, further writes, header changes and status changes
/// are ignored.
pub struct Response {
    status: Status,
    headers: Headers,
    buffer: BytesMut,
    error: Option<Error>,
    ended: bool,
    referer: Option<String>,
    content_types: Arc<ContentTypes>,
    transport: Box<dyn Transport>,
}

impl Response {
    /// Create a response writing to `transport`.
    ///
    /// `referer` is the `Referer` of the request being answered, used to
    /// resolve `redirect("back")`.
    pub fn new<T>(transport: T, content_types: Arc<ContentTypes>, referer: Option<String>) -> Self
    where
        T: Transport + 'static,
    {
        Response {
            status: Status::NotFound,
            headers: Headers::new(),
            buffer: BytesMut::new(),
            error: None,
            ended: false,
            referer,
            content_types,
            transport: Box::new(transport),
        }
    }

    pub fn status_code(&self) -> Status {
        self.status
    }

    /// Set the status code.
    pub fn status(&mut self, status: impl Into<Status>) -> &mut Self {
        if self.reject_after_end("status") {
            return self;
        }

        self.status = status.into();
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn get_headers(&self, name: &str) -> Vec<&str> {
        self.headers.get_all(name).collect()
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if !self.reject_after_end("header") {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set a header to multiple values.
    pub fn set_headers<I>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if !self.reject_after_end("header") {
            self.headers.insert_many(name, values);
        }
        self
    }

    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        if !self.reject_after_end("header") {
            self.headers.remove(name);
        }
        self
    }

    /// The bytes buffered so far.
    pub fn body(&self) -> &[u8] {
        &self.buffer
    }

    /// Append to the output buffer without ending the response.
    pub fn send(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        if !self.reject_after_end("body") {
            self.buffer.extend_from_slice(data.as_ref());
        }
        self
    }

    /// Serialize `value` as JSON into the buffer and set the content type.
    #[cfg(feature = "json")]
    pub fn send_json<T>(&mut self, value: &T) -> Result<&mut Self, Error>
    where
        T: serde::Serialize + ?Sized,
    {
        let json = serde_json::to_vec(value)?;
        self.set_header(CONTENT_TYPE, mime::APPLICATION_JSON.to_string());
        Ok(self.send(json))
    }

    /// Append the contents of a file to the buffer.
    ///
    /// The `Content-Type` header is set from the file's extension when the
    /// extension is known. The response is not ended. A file that cannot be
    /// read is returned as a [`SendFileError`].
    pub fn send_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, Error> {
        let path = path.as_ref();

        let data = std::fs::read(path).map_err(|source| SendFileError {
            path: path.to_owned(),
            source,
        })?;

        let file_name = path.to_string_lossy();
        if let Some(mime) = self.content_types.for_file_name(&file_name) {
            self.set_header(CONTENT_TYPE, mime.to_string());
        }

        Ok(self.send(data))
    }

    /// Set the status and send its reason phrase as the body.
    ///
    /// Codes without a known reason phrase send the numeric code instead.
    pub fn send_status(&mut self, status: impl Into<Status>) -> &mut Self {
        let status = status.into();
        self.status(status);

        match status.reason() {
            Some(reason) => self.send(reason),
            None => self.send(status.code().to_string()),
        }
    }

    /// Set the `Location` header.
    ///
    /// The path `"back"` resolves to the request's `Referer`, or `/`
    /// when there is none.
    pub fn location(&mut self, path: &str) -> &mut Self {
        let location = match path {
            "back" => self.referer.clone().unwrap_or_else(|| "/".to_owned()),
            path => path.to_owned(),
        };

        self.set_header(LOCATION, location)
    }

    /// Redirect with `302 Found`.
    pub fn redirect(&mut self, path: &str) -> Result<&mut Self, Error> {
        self.redirect_with(Status::MovedTemporarily, path)
    }

    /// Redirect with the given status and end the response.
    pub fn redirect_with(
        &mut self,
        status: impl Into<Status>,
        path: &str,
    ) -> Result<&mut Self, Error> {
        self.status(status).location(path).end()
    }

    /// Flush the buffered output through the transport and end the response.
    ///
    /// If the buffer is not empty and no `Content-Length` was set, one is
    /// computed from the buffer. Ending an already ended response does
    /// nothing.
    pub fn end(&mut self) -> Result<&mut Self, Error> {
        if self.ended {
            tracing::debug!("response already ended");
            return Ok(self);
        }

        if !self.buffer.is_empty() && self.headers.get_ignore_case(CONTENT_LENGTH).is_none() {
            self.headers
                .insert(CONTENT_LENGTH, self.buffer.len().to_string());
        }

        self.ended = true;

        self.transport.write_head(self.status, &self.headers)?;
        if !self.buffer.is_empty() {
            self.transport.write_data(&self.buffer)?;
        }
        self.transport.end()?;

        Ok(self)
    }

    /// Append to the buffer and end the response.
    pub fn end_with(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self, Error> {
        self.send(data).end()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// The error recorded for this request, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Record an error for this request.
    ///
    /// Once an error is recorded, no further route entries are invoked and
    /// the request completes with `500 Internal Server Error`. Only the
    /// first error is kept; returns `false` if one was already recorded.
    pub fn set_error(&mut self, error: impl Into<Error>) -> bool {
        if self.error.is_some() {
            return false;
        }

        self.error = Some(error.into());
        true
    }

    fn reject_after_end(&self, what: &str) -> bool {
        if self.ended {
            tracing::warn!(what, "ignoring write to an ended response");
        }

        self.ended
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("buffered", &self.buffer.len())
            .field("error", &self.error)
            .field("ended", &self.ended)
            .finish()
    }
}
