//! Header names and the header map.

mod map;

pub use map::{Headers, Values};

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const LOCATION: &str = "Location";
pub const REFERER: &str = "Referer";
