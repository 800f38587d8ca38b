use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::cbor::Cbor;
use crate::error::CborError;
use crate::tags::TAG_KNOWN_VALUE;

/// A registered ontological value, identified by its number alone.
///
/// The name is a display label and takes no part in equality or hashing.
#[derive(Clone, Debug)]
pub struct KnownValue {
    value: u64,
    name: Option<Cow<'static, str>>,
}

pub const NOTE: KnownValue = KnownValue::new_static(4, "note");
pub const BODY: KnownValue = KnownValue::new_static(100, "body");
pub const RESULT: KnownValue = KnownValue::new_static(101, "result");
pub const ERROR: KnownValue = KnownValue::new_static(102, "error");
/// Canonical successful result for requests that return nothing.
pub const OK: KnownValue = KnownValue::new_static(103, "OK");

impl KnownValue {
    pub const fn new(value: u64) -> Self {
        Self { value, name: None }
    }

    pub const fn new_static(value: u64, name: &'static str) -> Self {
        Self {
            value,
            name: Some(Cow::Borrowed(name)),
        }
    }

    pub fn with_name(value: u64, name: impl Into<String>) -> Self {
        Self {
            value,
            name: Some(Cow::Owned(name.into())),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn to_cbor(&self) -> Cbor {
        Cbor::tagged(TAG_KNOWN_VALUE, self.value)
    }
}

impl PartialEq for KnownValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for KnownValue {}

impl Hash for KnownValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for KnownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "'{}'", name),
            None => write!(f, "'{}'", self.value),
        }
    }
}

impl From<KnownValue> for Cbor {
    fn from(v: KnownValue) -> Self {
        v.to_cbor()
    }
}

impl TryFrom<Cbor> for KnownValue {
    type Error = CborError;

    /// Decodes the number only. Names of the well-known constants are
    /// restored; other values come back unnamed.
    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        let inner = cbor.expect_tag(TAG_KNOWN_VALUE)?;
        let value = inner.as_unsigned().ok_or(CborError::WrongType {
            expected: "unsigned",
            found: inner.kind(),
        })?;
        Ok([NOTE, BODY, RESULT, ERROR, OK]
            .into_iter()
            .find(|known| known.value == value)
            .unwrap_or(KnownValue::new(value)))
    }
}
