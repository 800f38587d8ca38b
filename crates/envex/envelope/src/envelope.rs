use std::fmt;
use std::hash::{Hash, Hasher};

use crate::cbor::Cbor;
use crate::cid::Cid;
use crate::digest::Digest;
use crate::error::{CborError, EnvelopeError};
use crate::known_value::KnownValue;
use crate::tags::{TAG_ENVELOPE, TAG_LEAF};

/// A subject carrying zero or more predicate/object assertions.
///
/// Envelopes are immutable values: adding an assertion consumes the envelope
/// and returns the extended one. Identity is the digest, which does not
/// depend on the order assertions were added in; iteration does preserve
/// insertion order.
#[derive(Clone, Debug)]
pub struct Envelope {
    subject: Cbor,
    assertions: Vec<Assertion>,
}

/// A single predicate/object pair attached to a subject.
#[derive(Clone, Debug)]
pub struct Assertion {
    predicate: Envelope,
    object: Envelope,
}

impl Assertion {
    pub fn new(predicate: impl Into<Envelope>, object: impl Into<Envelope>) -> Self {
        Self {
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn predicate(&self) -> &Envelope {
        &self.predicate
    }

    pub fn object(&self) -> &Envelope {
        &self.object
    }

    pub fn digest(&self) -> Digest {
        Digest::combine([&self.predicate.digest(), &self.object.digest()])
    }
}

impl Envelope {
    /// A leaf envelope with no assertions.
    pub fn new(subject: impl Into<Cbor>) -> Self {
        Self {
            subject: subject.into(),
            assertions: Vec::new(),
        }
    }

    pub fn subject(&self) -> &Cbor {
        &self.subject
    }

    /// The subject, provided the envelope carries no assertions.
    pub fn leaf_subject(&self) -> Result<&Cbor, EnvelopeError> {
        if self.is_leaf() {
            Ok(&self.subject)
        } else {
            Err(EnvelopeError::NotALeaf)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.assertions.is_empty()
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Return this envelope extended with one more assertion.
    pub fn add_assertion(
        mut self,
        predicate: impl Into<Envelope>,
        object: impl Into<Envelope>,
    ) -> Self {
        self.assertions.push(Assertion::new(predicate, object));
        self
    }

    /// Every assertion whose predicate matches `predicate`, in insertion order.
    pub fn assertions_with_predicate(&self, predicate: impl Into<Envelope>) -> Vec<&Assertion> {
        let target = predicate.into().digest();
        self.assertions
            .iter()
            .filter(|a| a.predicate.digest() == target)
            .collect()
    }

    /// Objects of every assertion whose predicate matches `predicate`.
    pub fn objects_for_predicate(&self, predicate: impl Into<Envelope>) -> Vec<&Envelope> {
        self.assertions_with_predicate(predicate)
            .into_iter()
            .map(Assertion::object)
            .collect()
    }

    pub fn digest(&self) -> Digest {
        let subject = Digest::hash(&self.subject.to_cbor_data());
        if self.assertions.is_empty() {
            return subject;
        }
        let mut parts: Vec<Digest> = self.assertions.iter().map(Assertion::digest).collect();
        parts.sort();
        Digest::combine(std::iter::once(&subject).chain(parts.iter()))
    }

    /// Untagged form: `24(subject)` for a leaf, otherwise
    /// `[24(subject), {predicate: object}, ...]`.
    pub fn untagged_cbor(&self) -> Cbor {
        let leaf = Cbor::Tagged(TAG_LEAF, Box::new(self.subject.clone()));
        if self.assertions.is_empty() {
            return leaf;
        }
        let mut items = Vec::with_capacity(self.assertions.len() + 1);
        items.push(leaf);
        for assertion in &self.assertions {
            items.push(Cbor::Map(vec![(
                assertion.predicate.untagged_cbor(),
                assertion.object.untagged_cbor(),
            )]));
        }
        Cbor::Array(items)
    }

    pub fn to_cbor(&self) -> Cbor {
        Cbor::Tagged(TAG_ENVELOPE, Box::new(self.untagged_cbor()))
    }

    pub fn to_cbor_data(&self) -> Vec<u8> {
        self.to_cbor().to_cbor_data()
    }

    pub fn try_from_cbor(cbor: &Cbor) -> Result<Self, EnvelopeError> {
        let inner = cbor.expect_tag(TAG_ENVELOPE)?;
        Self::try_from_untagged_cbor(inner)
    }

    pub fn try_from_data(data: &[u8]) -> Result<Self, EnvelopeError> {
        Self::try_from_cbor(&Cbor::try_from_data(data)?)
    }

    pub fn try_from_untagged_cbor(cbor: &Cbor) -> Result<Self, EnvelopeError> {
        match cbor {
            Cbor::Tagged(TAG_LEAF, subject) => Ok(Self::new(subject.as_ref().clone())),
            Cbor::Array(items) => {
                let (first, rest) = items
                    .split_first()
                    .ok_or_else(|| EnvelopeError::InvalidFormat("empty node".into()))?;
                let subject = match first {
                    Cbor::Tagged(TAG_LEAF, subject) => subject.as_ref().clone(),
                    other => {
                        return Err(EnvelopeError::InvalidFormat(format!(
                            "node subject must be a leaf, found {}",
                            other.kind()
                        )))
                    }
                };
                if rest.is_empty() {
                    return Err(EnvelopeError::InvalidFormat(
                        "node without assertions".into(),
                    ));
                }
                let mut envelope = Self::new(subject);
                for item in rest {
                    let (predicate, object) = match item {
                        Cbor::Map(entries) if entries.len() == 1 => &entries[0],
                        other => {
                            return Err(EnvelopeError::InvalidFormat(format!(
                                "assertion must be a single-entry map, found {}",
                                other.kind()
                            )))
                        }
                    };
                    envelope = envelope.add_assertion(
                        Self::try_from_untagged_cbor(predicate)?,
                        Self::try_from_untagged_cbor(object)?,
                    );
                }
                Ok(envelope)
            }
            other => Err(EnvelopeError::InvalidFormat(format!(
                "expected leaf or node, found {}",
                other.kind()
            ))),
        }
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.digest() == other.digest()
    }
}

impl Eq for Envelope {}

impl Hash for Envelope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest().hash(state);
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)?;
        if self.assertions.is_empty() {
            return Ok(());
        }
        write!(f, " [")?;
        for (i, assertion) in self.assertions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", assertion.predicate, assertion.object)?;
        }
        write!(f, "]")
    }
}

/// Typed decoding of an envelope.
///
/// Scalar types decode from the subject of a leaf envelope and fail with
/// [`EnvelopeError::NotALeaf`] when assertions are present. `Envelope`
/// decodes to itself.
pub trait FromEnvelope: Sized {
    fn from_envelope(envelope: &Envelope) -> Result<Self, EnvelopeError>;
}

impl FromEnvelope for Envelope {
    fn from_envelope(envelope: &Envelope) -> Result<Self, EnvelopeError> {
        Ok(envelope.clone())
    }
}

impl FromEnvelope for Cbor {
    fn from_envelope(envelope: &Envelope) -> Result<Self, EnvelopeError> {
        Ok(envelope.leaf_subject()?.clone())
    }
}

macro_rules! leaf_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvelope for $ty {
                fn from_envelope(envelope: &Envelope) -> Result<Self, EnvelopeError> {
                    let subject = envelope.leaf_subject()?.clone();
                    <$ty>::try_from(subject).map_err(|e: CborError| e.into())
                }
            }

            impl From<$ty> for Envelope {
                fn from(value: $ty) -> Self {
                    Envelope::new(Cbor::from(value))
                }
            }
        )*
    };
}

leaf_conversions!(String, u64, i64, bool, Vec<u8>, KnownValue, Cid);

impl From<Cbor> for Envelope {
    fn from(subject: Cbor) -> Self {
        Envelope::new(subject)
    }
}

impl From<&str> for Envelope {
    fn from(value: &str) -> Self {
        Envelope::new(value)
    }
}

impl From<&Envelope> for Envelope {
    fn from(value: &Envelope) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::known_value::{BODY, ERROR, NOTE, RESULT};

    #[test]
    fn leaf_has_no_assertions() {
        let e = Envelope::new("hello");
        assert!(e.is_leaf());
        assert_eq!(e.subject(), &Cbor::from("hello"));
        assert_eq!(String::from_envelope(&e).unwrap(), "hello");
    }

    #[test]
    fn add_assertion_is_additive() {
        let e = Envelope::new("s")
            .add_assertion(NOTE, "first")
            .add_assertion(NOTE, "second")
            .add_assertion(BODY, 7u64);
        assert_eq!(e.assertions().len(), 3);
        let notes: Vec<String> = e
            .objects_for_predicate(NOTE)
            .into_iter()
            .map(|o| String::from_envelope(o).unwrap())
            .collect();
        assert_eq!(notes, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(e.assertions_with_predicate(BODY).len(), 1);
        assert!(e.assertions_with_predicate(ERROR).is_empty());
    }

    #[test]
    fn identity_ignores_assertion_order() {
        let a = Envelope::new("s")
            .add_assertion(RESULT, 1u64)
            .add_assertion(RESULT, 2u64);
        let b = Envelope::new("s")
            .add_assertion(RESULT, 2u64)
            .add_assertion(RESULT, 1u64);
        assert_eq!(a, b);
        assert_ne!(a, Envelope::new("s").add_assertion(RESULT, 1u64));
    }

    #[test]
    fn leaf_and_node_digests_differ() {
        let leaf = Envelope::new("s");
        let node = Envelope::new("s").add_assertion(NOTE, "n");
        assert_ne!(leaf.digest(), node.digest());
    }

    #[test]
    fn scalar_decode_requires_leaf() {
        let node = Envelope::new(5u64).add_assertion(NOTE, "n");
        assert!(matches!(
            u64::from_envelope(&node),
            Err(EnvelopeError::NotALeaf)
        ));
        assert_eq!(Envelope::from_envelope(&node).unwrap(), node);
    }

    #[test]
    fn scalar_decode_reports_wrong_type() {
        let e = Envelope::new("text");
        assert!(matches!(
            u64::from_envelope(&e),
            Err(EnvelopeError::Cbor(CborError::WrongType { .. }))
        ));
    }

    #[test]
    fn binary_roundtrip_preserves_order() {
        let nested = Envelope::new("inner").add_assertion(NOTE, true);
        let e = Envelope::new(Cid::from_bytes([1u8; 32]))
            .add_assertion(BODY, nested.clone())
            .add_assertion(RESULT, -3i64)
            .add_assertion(RESULT, vec![1u8, 2, 3]);
        let data = e.to_cbor_data();
        let restored = Envelope::try_from_data(&data).unwrap();
        assert_eq!(restored, e);
        let objects: Vec<&Envelope> = restored.objects_for_predicate(RESULT);
        assert_eq!(i64::from_envelope(objects[0]).unwrap(), -3);
        assert_eq!(restored.objects_for_predicate(BODY)[0], &nested);
    }

    #[test]
    fn rejects_malformed_nodes() {
        let not_leaf = Cbor::tagged(TAG_ENVELOPE, Cbor::Array(vec![Cbor::Unsigned(1)]));
        assert!(Envelope::try_from_cbor(&not_leaf).is_err());

        let lonely = Cbor::tagged(
            TAG_ENVELOPE,
            Cbor::Array(vec![Cbor::tagged(TAG_LEAF, 1u64)]),
        );
        assert!(Envelope::try_from_cbor(&lonely).is_err());

        assert!(Envelope::try_from_cbor(&Cbor::tagged(TAG_LEAF, 1u64)).is_err());
    }

    #[test]
    fn display_lists_assertions() {
        let e = Envelope::new("s").add_assertion(NOTE, "n");
        assert_eq!(e.to_string(), "\"s\" [40000(4): \"n\"]");
    }
}
