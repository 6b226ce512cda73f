use super::ParsedBody;

use serde_json::Value;

/// Parse a JSON document. Invalid JSON and a bare `null` both decode to `None`.
pub(super) fn parse(bytes: &[u8]) -> Option<ParsedBody> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => None,
        Ok(json) => Some(ParsedBody::Json(json)),
        Err(err) => {
            tracing::trace!(error = %err, "discarding malformed json body");
            None
        }
    }
}
