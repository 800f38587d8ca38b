//! Minimal CBOR value model with a canonical binary codec.
//!
//! Only the items envelopes need are modelled: integers that fit in 64 bits,
//! byte and text strings, definite-length arrays and maps, tags, booleans and
//! null. Decoding is strict: indefinite-length items, floats, other simple
//! values and trailing bytes are rejected.

use std::fmt;

use minicbor::data::{Tag, Type};
use minicbor::{Decoder, Encoder};

use crate::error::CborError;

/// Maximum nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

/// A CBOR data item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cbor {
    Unsigned(u64),
    /// Always strictly negative; non-negative integers are `Unsigned`.
    Negative(i64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Cbor>),
    Map(Vec<(Cbor, Cbor)>),
    Tagged(u64, Box<Cbor>),
    Bool(bool),
    Null,
}

impl Cbor {
    pub fn tagged(tag: u64, inner: impl Into<Cbor>) -> Self {
        Cbor::Tagged(tag, Box::new(inner.into()))
    }

    /// Split a tagged item into its tag and content.
    pub fn as_tagged(&self) -> Option<(u64, &Cbor)> {
        match self {
            Cbor::Tagged(tag, inner) => Some((*tag, inner)),
            _ => None,
        }
    }

    /// Return the content of an item carrying exactly `tag`.
    pub fn expect_tag(&self, tag: u64) -> Result<&Cbor, CborError> {
        match self.as_tagged() {
            Some((found, inner)) if found == tag => Ok(inner),
            Some((found, _)) => Err(CborError::WrongTag {
                expected: tag,
                found: Some(found),
            }),
            None => Err(CborError::WrongTag {
                expected: tag,
                found: None,
            }),
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Cbor::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cbor::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the item's major kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Cbor::Unsigned(_) => "unsigned",
            Cbor::Negative(_) => "negative",
            Cbor::Bytes(_) => "bytes",
            Cbor::Text(_) => "text",
            Cbor::Array(_) => "array",
            Cbor::Map(_) => "map",
            Cbor::Tagged(_, _) => "tagged",
            Cbor::Bool(_) => "bool",
            Cbor::Null => "null",
        }
    }

    /// Encode to canonical CBOR bytes.
    pub fn encode(&self) -> Result<Vec<u8>, CborError> {
        let mut buf = Vec::new();
        let mut enc = Encoder::new(&mut buf);
        encode_item(&mut enc, self)?;
        Ok(buf)
    }

    /// Encode to canonical CBOR bytes.
    ///
    /// Writing into a `Vec` cannot fail, so an encoder error yields an empty
    /// buffer rather than a `Result`.
    pub fn to_cbor_data(&self) -> Vec<u8> {
        self.encode().unwrap_or_default()
    }

    /// Decode exactly one CBOR item from `data`.
    pub fn try_from_data(data: &[u8]) -> Result<Self, CborError> {
        let mut dec = Decoder::new(data);
        let item = decode_item(&mut dec, 0)?;
        if dec.position() != data.len() {
            return Err(CborError::TrailingBytes);
        }
        Ok(item)
    }
}

fn encode_item(
    enc: &mut Encoder<&mut Vec<u8>>,
    item: &Cbor,
) -> Result<(), minicbor::encode::Error<std::convert::Infallible>> {
    match item {
        Cbor::Unsigned(v) => {
            enc.u64(*v)?;
        }
        Cbor::Negative(v) => {
            enc.i64(*v)?;
        }
        Cbor::Bytes(b) => {
            enc.bytes(b)?;
        }
        Cbor::Text(s) => {
            enc.str(s)?;
        }
        Cbor::Array(items) => {
            enc.array(items.len() as u64)?;
            for item in items {
                encode_item(enc, item)?;
            }
        }
        Cbor::Map(entries) => {
            enc.map(entries.len() as u64)?;
            for (k, v) in entries {
                encode_item(enc, k)?;
                encode_item(enc, v)?;
            }
        }
        Cbor::Tagged(tag, inner) => {
            enc.tag(Tag::new(*tag))?;
            encode_item(enc, inner)?;
        }
        Cbor::Bool(b) => {
            enc.bool(*b)?;
        }
        Cbor::Null => {
            enc.null()?;
        }
    }
    Ok(())
}

fn decode_item(dec: &mut Decoder<'_>, depth: usize) -> Result<Cbor, CborError> {
    if depth > MAX_DEPTH {
        return Err(CborError::DepthExceeded(MAX_DEPTH));
    }
    match dec.datatype()? {
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => Ok(Cbor::Unsigned(dec.u64()?)),
        Type::I8 | Type::I16 | Type::I32 | Type::I64 => {
            let v = dec.i64()?;
            if v >= 0 {
                Ok(Cbor::Unsigned(v as u64))
            } else {
                Ok(Cbor::Negative(v))
            }
        }
        Type::Bytes => Ok(Cbor::Bytes(dec.bytes()?.to_vec())),
        Type::String => Ok(Cbor::Text(dec.str()?.to_owned())),
        Type::Array => {
            let len = dec.array()?.ok_or(CborError::IndefiniteLength)?;
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(decode_item(dec, depth + 1)?);
            }
            Ok(Cbor::Array(items))
        }
        Type::Map => {
            let len = dec.map()?.ok_or(CborError::IndefiniteLength)?;
            let mut entries = Vec::new();
            for _ in 0..len {
                let k = decode_item(dec, depth + 1)?;
                let v = decode_item(dec, depth + 1)?;
                entries.push((k, v));
            }
            Ok(Cbor::Map(entries))
        }
        Type::Tag => {
            let tag = dec.tag()?;
            let inner = decode_item(dec, depth + 1)?;
            Ok(Cbor::Tagged(tag.as_u64(), Box::new(inner)))
        }
        Type::Bool => Ok(Cbor::Bool(dec.bool()?)),
        Type::Null => {
            dec.null()?;
            Ok(Cbor::Null)
        }
        Type::BytesIndef | Type::StringIndef | Type::ArrayIndef | Type::MapIndef => {
            Err(CborError::IndefiniteLength)
        }
        other => Err(CborError::Unsupported(other.to_string())),
    }
}

impl fmt::Display for Cbor {
    /// CBOR diagnostic notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cbor::Unsigned(v) => write!(f, "{}", v),
            Cbor::Negative(v) => write!(f, "{}", v),
            Cbor::Bytes(b) => {
                write!(f, "h'")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, "'")
            }
            Cbor::Text(s) => write!(f, "{:?}", s),
            Cbor::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Cbor::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Cbor::Tagged(tag, inner) => write!(f, "{}({})", tag, inner),
            Cbor::Bool(b) => write!(f, "{}", b),
            Cbor::Null => write!(f, "null"),
        }
    }
}

impl From<u64> for Cbor {
    fn from(v: u64) -> Self {
        Cbor::Unsigned(v)
    }
}

impl From<i64> for Cbor {
    fn from(v: i64) -> Self {
        if v >= 0 {
            Cbor::Unsigned(v as u64)
        } else {
            Cbor::Negative(v)
        }
    }
}

impl From<bool> for Cbor {
    fn from(v: bool) -> Self {
        Cbor::Bool(v)
    }
}

impl From<&str> for Cbor {
    fn from(v: &str) -> Self {
        Cbor::Text(v.to_owned())
    }
}

impl From<String> for Cbor {
    fn from(v: String) -> Self {
        Cbor::Text(v)
    }
}

impl From<Vec<u8>> for Cbor {
    fn from(v: Vec<u8>) -> Self {
        Cbor::Bytes(v)
    }
}

impl TryFrom<Cbor> for u64 {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor {
            Cbor::Unsigned(v) => Ok(v),
            other => Err(CborError::WrongType {
                expected: "unsigned",
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Cbor> for i64 {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor {
            Cbor::Unsigned(v) => i64::try_from(v).map_err(|_| CborError::WrongType {
                expected: "i64",
                found: "unsigned",
            }),
            Cbor::Negative(v) => Ok(v),
            other => Err(CborError::WrongType {
                expected: "integer",
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Cbor> for bool {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor {
            Cbor::Bool(v) => Ok(v),
            other => Err(CborError::WrongType {
                expected: "bool",
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Cbor> for String {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor {
            Cbor::Text(v) => Ok(v),
            other => Err(CborError::WrongType {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Cbor> for Vec<u8> {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor {
            Cbor::Bytes(v) => Ok(v),
            other => Err(CborError::WrongType {
                expected: "bytes",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cbor {
        Cbor::Array(vec![
            Cbor::Unsigned(0),
            Cbor::Unsigned(u64::MAX),
            Cbor::Negative(-1),
            Cbor::Negative(i64::MIN),
            Cbor::Bytes(vec![0, 1, 0xff]),
            Cbor::Text("hello".into()),
            Cbor::Map(vec![(Cbor::Text("k".into()), Cbor::Bool(true))]),
            Cbor::tagged(40006, 1u64),
            Cbor::Null,
        ])
    }

    #[test]
    fn encodes_small_unsigned_in_one_byte() {
        assert_eq!(Cbor::Unsigned(5).to_cbor_data(), vec![0x05]);
        assert_eq!(Cbor::Unsigned(24).to_cbor_data(), vec![0x18, 24]);
    }

    #[test]
    fn encodes_tagged_unsigned() {
        // 40006 = 0x9c46, tag header 0xd9 + 2 bytes
        assert_eq!(
            Cbor::tagged(40006, 1u64).to_cbor_data(),
            vec![0xd9, 0x9c, 0x46, 0x01]
        );
    }

    #[test]
    fn binary_roundtrip() {
        let item = sample();
        let data = item.to_cbor_data();
        assert_eq!(Cbor::try_from_data(&data).unwrap(), item);
    }

    #[test]
    fn rejects_trailing_bytes() {
        let err = Cbor::try_from_data(&[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, CborError::TrailingBytes));
    }

    #[test]
    fn rejects_indefinite_length() {
        // indefinite array containing 1, then break
        let err = Cbor::try_from_data(&[0x9f, 0x01, 0xff]).unwrap_err();
        assert!(matches!(err, CborError::IndefiniteLength));
    }

    #[test]
    fn rejects_floats() {
        // half-precision 0.0
        let err = Cbor::try_from_data(&[0xf9, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, CborError::Unsupported(_)));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let mut data = vec![0x81; MAX_DEPTH + 2];
        data.push(0x00);
        let err = Cbor::try_from_data(&data).unwrap_err();
        assert!(matches!(err, CborError::DepthExceeded(_)));
    }

    #[test]
    fn expect_tag_reports_mismatch() {
        let item = Cbor::tagged(40007, "x");
        assert_eq!(item.expect_tag(40007).unwrap(), &Cbor::from("x"));
        match item.expect_tag(40006) {
            Err(CborError::WrongTag { expected, found }) => {
                assert_eq!(expected, 40006);
                assert_eq!(found, Some(40007));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            Cbor::Null.expect_tag(1),
            Err(CborError::WrongTag { found: None, .. })
        ));
    }

    #[test]
    fn diagnostic_notation() {
        assert_eq!(Cbor::tagged(40006, 1u64).to_string(), "40006(1)");
        assert_eq!(Cbor::from("hi").to_string(), "\"hi\"");
        assert_eq!(Cbor::Bytes(vec![0, 0xff]).to_string(), "h'00ff'");
        assert_eq!(
            Cbor::Array(vec![Cbor::Unsigned(1), Cbor::Null]).to_string(),
            "[1, null]"
        );
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(u64::try_from(Cbor::from(7u64)).unwrap(), 7);
        assert_eq!(i64::try_from(Cbor::from(-7i64)).unwrap(), -7);
        assert_eq!(i64::try_from(Cbor::from(7i64)).unwrap(), 7);
        assert_eq!(String::try_from(Cbor::from("s")).unwrap(), "s");
        assert!(bool::try_from(Cbor::from(true)).unwrap());
        assert!(matches!(
            u64::try_from(Cbor::from("s")),
            Err(CborError::WrongType {
                expected: "unsigned",
                found: "text"
            })
        ));
        assert!(i64::try_from(Cbor::Unsigned(u64::MAX)).is_err());
    }
}
