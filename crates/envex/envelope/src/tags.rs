//! Reserved CBOR tag numbers.
//!
//! These values are part of the wire format. They must never be renumbered.

/// Encoded-CBOR leaf marker wrapping an envelope subject.
pub const TAG_LEAF: u64 = 24;

/// A tagged envelope.
pub const TAG_ENVELOPE: u64 = 200;

/// A known value (`body`, `result`, `error`, ...).
pub const TAG_KNOWN_VALUE: u64 = 40000;

/// Subject of a request message; wraps the correlation id.
pub const TAG_REQUEST: u64 = 40004;

/// Subject of a response message; wraps the correlation id or `"unknown"`.
pub const TAG_RESPONSE: u64 = 40005;

/// A function identifier.
pub const TAG_FUNCTION: u64 = 40006;

/// A parameter identifier.
pub const TAG_PARAMETER: u64 = 40007;

/// A correlation id.
pub const TAG_CID: u64 = 40012;

/// Human-readable name of a reserved tag, for diagnostics.
pub fn tag_name(tag: u64) -> Option<&'static str> {
    match tag {
        TAG_LEAF => Some("leaf"),
        TAG_ENVELOPE => Some("envelope"),
        TAG_KNOWN_VALUE => Some("known-value"),
        TAG_REQUEST => Some("request"),
        TAG_RESPONSE => Some("response"),
        TAG_FUNCTION => Some("function"),
        TAG_PARAMETER => Some("parameter"),
        TAG_CID => Some("cid"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_tags_are_distinct() {
        let tags = [TAG_REQUEST, TAG_RESPONSE, TAG_FUNCTION, TAG_PARAMETER];
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn names_reserved_tags_only() {
        assert_eq!(tag_name(TAG_FUNCTION), Some("function"));
        assert_eq!(tag_name(TAG_CID), Some("cid"));
        assert_eq!(tag_name(1), None);
    }
}
