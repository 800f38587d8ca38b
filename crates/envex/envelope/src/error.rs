use std::convert::Infallible;

use thiserror::Error;

/// Errors from the CBOR value codec.
#[derive(Error, Debug)]
pub enum CborError {
    #[error("cbor decode: {0}")]
    Decode(#[from] minicbor::decode::Error),

    #[error("cbor encode: {0}")]
    Encode(#[from] minicbor::encode::Error<Infallible>),

    #[error("indefinite-length CBOR not allowed")]
    IndefiniteLength,

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("trailing bytes after CBOR item")]
    TrailingBytes,

    #[error("unsupported CBOR item: {0}")]
    Unsupported(String),

    #[error("wrong CBOR type: expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("wrong CBOR tag: expected {expected}, found {found:?}")]
    WrongTag { expected: u64, found: Option<u64> },

    #[error("invalid length for {what}: expected {expected}, found {found}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Errors from envelope construction, parsing and typed extraction.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("envelope has assertions; expected a leaf")]
    NotALeaf,

    #[error("invalid envelope format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Cbor(#[from] CborError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_tag_display() {
        let e = CborError::WrongTag {
            expected: 40012,
            found: Some(24),
        };
        let msg = format!("{}", e);
        assert!(msg.contains("40012"));
        assert!(msg.contains("24"));
    }

    #[test]
    fn cbor_error_converts_into_envelope_error() {
        let e: EnvelopeError = CborError::TrailingBytes.into();
        assert!(matches!(e, EnvelopeError::Cbor(CborError::TrailingBytes)));
    }
}
