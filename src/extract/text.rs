use super::ParsedBody;

pub(super) fn parse(bytes: &[u8]) -> Option<ParsedBody> {
    String::from_utf8(bytes.to_vec()).ok().map(ParsedBody::Text)
}
