use std::any::Any;
use std::fmt;
use std::path::PathBuf;

/// A type-erased error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error raised by a handler or a response operation.
///
/// Any type implementing [`std::error::Error`] converts into this type, so
/// handlers can use the `?` operator freely. When a handler returns an error
/// the router records it on the response and the request ends with a
/// `500 Internal Server Error`.
pub struct Error {
    inner: BoxError,
}

impl Error {
    /// Create an error from any error type.
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self { inner: err.into() }
    }

    /// Create an error from a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self {
            inner: message.to_string().into(),
        }
    }

    /// Returns a reference to the underlying error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.inner.downcast_ref()
    }

    /// Returns the underlying error.
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

// `Error` does not implement `std::error::Error` itself, otherwise this
// impl would overlap with `impl<T> From<T> for T`.
impl<E> From<E> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self {
            inner: Box::new(err),
        }
    }
}

/// Error returned when a route pattern cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Patterns must be absolute.
    #[error("route pattern '{0}' must start with '/'")]
    Relative(String),

    /// The pattern syntax was rejected by the matcher.
    #[error("invalid route pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// Error returned by [`Response::send_file`](crate::Response::send_file).
#[derive(Debug, thiserror::Error)]
#[error("failed to read file '{}': {source}", .path.display())]
pub struct SendFileError {
    pub(crate) path: PathBuf,
    #[source]
    pub(crate) source: std::io::Error,
}

impl SendFileError {
    /// The path that could not be read.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// A handler panicked while processing a request.
#[derive(Debug, thiserror::Error)]
#[error("handler panicked: {message}")]
pub struct HandlerPanic {
    message: String,
}

impl HandlerPanic {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_owned()
        };

        Self { message }
    }

    /// The panic message, if one could be recovered.
    pub fn message(&self) -> &str {
        &self.message
    }
}
