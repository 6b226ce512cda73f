//! Request body decoding.
//!
//! [`decode`] picks a decoder from the request's content type and returns a
//! [`ParsedBody`]. A body that cannot be read or parsed decodes to `None`
//! rather than an error: handlers should read a missing body as "not
//! applicable", never as "the request failed".

mod body;
mod form;
#[cfg(feature = "json")]
mod json;
mod parser;
mod text;

pub use body::read_to_end;
pub use parser::BodyParser;

use std::collections::HashMap;
use std::io::Read;

use mime::Mime;

/// A decoded request body.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedBody {
    /// A JSON document.
    #[cfg(feature = "json")]
    Json(serde_json::Value),
    /// A `application/x-www-form-urlencoded` form.
    UrlEncoded(HashMap<String, String>),
    /// A `text/*` payload.
    Text(String),
}

impl ParsedBody {
    #[cfg(feature = "json")]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ParsedBody::Json(json) => Some(json),
            _ => None,
        }
    }

    pub fn as_url_encoded(&self) -> Option<&HashMap<String, String>> {
        match self {
            ParsedBody::UrlEncoded(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedBody::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The decoders a content type can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Json,
    UrlEncoded,
    Text,
}

impl Kind {
    fn of(content_type: &str) -> Option<Kind> {
        let mime = content_type.trim().parse::<Mime>().ok()?;

        if mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON) {
            Some(Kind::Json)
        } else if mime.type_() == mime::APPLICATION
            && mime.subtype() == mime::WWW_FORM_URLENCODED
        {
            Some(Kind::UrlEncoded)
        } else if mime.type_() == mime::TEXT {
            Some(Kind::Text)
        } else {
            None
        }
    }
}

/// Decode a request body according to its content type.
///
/// Reads `reader` to exhaustion when the content type is JSON, a
/// URL-encoded form or any `text/*` type; any other content type, or
/// none at all, leaves the reader untouched and returns `None`.
pub fn decode<R>(reader: &mut R, content_type: Option<&str>) -> Option<ParsedBody>
where
    R: Read + ?Sized,
{
    decode_with_limit(reader, content_type, None)
}

pub(crate) fn decode_with_limit<R>(
    reader: &mut R,
    content_type: Option<&str>,
    limit: Option<usize>,
) -> Option<ParsedBody>
where
    R: Read + ?Sized,
{
    let kind = Kind::of(content_type?)?;

    let bytes = match body::read_to_end_limited(reader, limit) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "failed to read request body");
            return None;
        }
    };

    match kind {
        #[cfg(feature = "json")]
        Kind::Json => json::parse(&bytes),
        #[cfg(not(feature = "json"))]
        Kind::Json => None,
        Kind::UrlEncoded => form::parse(&bytes),
        Kind::Text => text::parse(&bytes),
    }
}
