//! An ordered request router.
//!
//! Routes and middleware are matched in the order they were registered and
//! invoked through a cooperative continuation chain: every matching entry
//! receives the request, the response, and a [`Next`] it may call to pass
//! control further down the table.
//!
//! ```
//! use junction::http::{Method, Status};
//! use junction::{Completion, Recorder, Router};
//!
//! let router = Router::new()
//!     .middleware(None, |req, _res, next| {
//!         tracing::info!(path = req.path(), "incoming");
//!         next.call();
//!         Ok(())
//!     })
//!     .get("/hello/:name", |req, res, _next| {
//!         let name = req.param("name").unwrap_or("world").to_owned();
//!         res.status(Status::Ok).end_with(format!("hello {}", name))?;
//!         Ok(())
//!     });
//!
//! let recorder = Recorder::new();
//! let request = http::Request::builder()
//!     .method(Method::GET)
//!     .uri("/hello/ferris")
//!     .body(())
//!     .unwrap();
//! let (parts, ()) = request.into_parts();
//!
//! let completion = router.serve(parts, std::io::empty(), recorder.clone());
//! assert_eq!(completion, Completion::Ended);
//! assert_eq!(recorder.body(), "hello ferris");
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod transport;

pub mod extract;
pub mod http;

pub use error::{BoxError, Error, HandlerPanic, PatternError, SendFileError};
pub use extract::{BodyParser, ParsedBody};
pub use handler::{Handler, Next};
pub use request::Request;
pub use response::Response;
pub use router::{Completion, Kind, Pattern, Route, Router};
pub use transport::{Recorder, Transport};
