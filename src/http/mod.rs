//! HTTP primitives used by the router.

pub mod header;

mod content_types;
mod method;
mod params;
mod status;

pub use bytes::Bytes;
pub use content_types::ContentTypes;
pub use header::Headers;
pub use method::RouteMethod;
pub use params::Params;
pub use status::{Status, StatusClass};

pub use ::http::request::Parts;
pub use ::http::{Extensions, Method, Uri};
