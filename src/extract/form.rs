use super::ParsedBody;

use std::collections::HashMap;

/// Parse a URL-encoded form.
///
/// Every `&`-separated pair must contain exactly one `=`; a single malformed
/// pair, or a body with no pairs at all, fails the whole form. Keys and
/// values are kept exactly as sent, without percent-decoding, and a
/// repeated key keeps its last value.
pub(super) fn parse(bytes: &[u8]) -> Option<ParsedBody> {
    let body = std::str::from_utf8(bytes).ok()?;
    let mut form = HashMap::new();

    for pair in body.split('&') {
        let mut parts = pair.split('=');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                form.insert(key.to_owned(), value.to_owned());
            }
            _ => {
                tracing::trace!(pair, "malformed form pair");
                return None;
            }
        }
    }

    if form.is_empty() {
        return None;
    }

    Some(ParsedBody::UrlEncoded(form))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str) -> Option<HashMap<String, String>> {
        match parse(body.as_bytes())? {
            ParsedBody::UrlEncoded(form) => Some(form),
            _ => None,
        }
    }

    #[test]
    fn pairs() {
        let form = form("a=1&b=2").unwrap();
        assert_eq!(form.get("a").map(String::as_str), Some("1"));
        assert_eq!(form.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn empty_values_are_pairs() {
        let form = form("a=&b=2").unwrap();
        assert_eq!(form.get("a").map(String::as_str), Some(""));
    }

    #[test]
    fn values_are_not_decoded() {
        let form = form("q=a%20b+c").unwrap();
        assert_eq!(form.get("q").map(String::as_str), Some("a%20b+c"));
    }

    #[test]
    fn last_value_wins() {
        let form = form("a=1&a=2").unwrap();
        assert_eq!(form.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn malformed() {
        assert!(form("a=1&bad").is_none());
        assert!(form("a=1=2").is_none());
        assert!(form("a=1&").is_none());
        assert!(form("").is_none());
    }
}
