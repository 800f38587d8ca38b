//! Tagged CBOR encoding of identifiers.
//!
//! Known identifiers travel as `tag(code)`, named ones as `tag("name")`,
//! where `tag` is the role's reserved tag. Names of known identifiers never
//! reach the wire; decoding restores them from the role's registry.

use envex_envelope::{Cbor, CborError, Envelope, EnvelopeError, FromEnvelope};

use crate::error::ExpressionError;
use crate::identifier::{Identifier, Role};
use crate::registry::KnownRegistry;

impl<R: Role> Identifier<R> {
    pub fn to_cbor(&self) -> Cbor {
        match self.code() {
            Some(code) => Cbor::tagged(R::TAG, code),
            None => Cbor::tagged(R::TAG, self.name().unwrap_or_default()),
        }
    }

    /// Decode against an explicit registry.
    ///
    /// A bare code found in `registry` decodes to the registered identifier,
    /// display name included; an unregistered code decodes unnamed.
    pub fn from_cbor_with(cbor: &Cbor, registry: &KnownRegistry<R>) -> Result<Self, ExpressionError> {
        let inner = match cbor.as_tagged() {
            Some((tag, inner)) if tag == R::TAG => inner,
            Some((tag, _)) => {
                return Err(ExpressionError::InvalidTag {
                    expected: R::TAG,
                    found: Some(tag),
                })
            }
            None => {
                return Err(ExpressionError::InvalidTag {
                    expected: R::TAG,
                    found: None,
                })
            }
        };
        match inner {
            Cbor::Unsigned(code) => Ok(registry.canonical_or_bare(*code)),
            Cbor::Text(name) => Ok(Self::new_named(name.clone())),
            other => Err(ExpressionError::InvalidFormat(format!(
                "{} identifier must be an unsigned integer or text, found {}",
                R::KIND,
                other.kind()
            ))),
        }
    }

    /// Decode against the role's process-wide registry.
    pub fn from_cbor(cbor: &Cbor) -> Result<Self, ExpressionError> {
        Self::from_cbor_with(cbor, R::global())
    }
}

impl<R: Role> From<Identifier<R>> for Cbor {
    fn from(id: Identifier<R>) -> Self {
        id.to_cbor()
    }
}

impl<R: Role> From<&Identifier<R>> for Cbor {
    fn from(id: &Identifier<R>) -> Self {
        id.to_cbor()
    }
}

impl<R: Role> TryFrom<Cbor> for Identifier<R> {
    type Error = ExpressionError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        Self::from_cbor(&cbor)
    }
}

impl<R: Role> From<Identifier<R>> for Envelope {
    fn from(id: Identifier<R>) -> Self {
        Envelope::new(id.to_cbor())
    }
}

impl<R: Role> From<&Identifier<R>> for Envelope {
    fn from(id: &Identifier<R>) -> Self {
        Envelope::new(id.to_cbor())
    }
}

impl<R: Role> FromEnvelope for Identifier<R> {
    fn from_envelope(envelope: &Envelope) -> Result<Self, EnvelopeError> {
        Self::from_cbor(envelope.leaf_subject()?).map_err(|e| match e {
            ExpressionError::InvalidTag { expected, found } => {
                CborError::WrongTag { expected, found }.into()
            }
            other => EnvelopeError::InvalidFormat(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use envex_envelope::tags::{TAG_FUNCTION, TAG_PARAMETER};

    use super::*;
    use crate::function::{self, Function, FunctionRole};
    use crate::parameter::{Parameter, ParameterRole};

    #[test]
    fn encodes_known_as_tagged_code() {
        let cbor = Function::new_static(1, "add").to_cbor();
        assert_eq!(cbor, Cbor::tagged(TAG_FUNCTION, 1u64));
        assert_eq!(cbor.to_cbor_data(), vec![0xd9, 0x9c, 0x46, 0x01]);
    }

    #[test]
    fn encodes_named_as_tagged_text() {
        let cbor = Parameter::new_named("amount").to_cbor();
        assert_eq!(cbor, Cbor::tagged(TAG_PARAMETER, "amount"));
    }

    #[test]
    fn name_is_not_on_the_wire() {
        assert_eq!(
            Function::new_known(5, Some("foo".into())).to_cbor(),
            Function::from_code(5).to_cbor()
        );
    }

    #[test]
    fn decode_rehydrates_from_registry() {
        let registry = KnownRegistry::<FunctionRole>::new();
        let wire = Function::from_code(42).to_cbor();

        let before = Function::from_cbor_with(&wire, &registry).unwrap();
        assert_eq!(before, Function::from_code(42));
        assert_eq!(before.name(), None);

        registry
            .register(Function::new_known(42, Some("answer".into())))
            .unwrap();
        let after = Function::from_cbor_with(&wire, &registry).unwrap();
        assert_eq!(after, before);
        assert_eq!(after.name(), Some("answer"));
        assert_eq!(after.to_string(), "answer");
    }

    #[test]
    fn decode_named() {
        let registry = KnownRegistry::<ParameterRole>::new();
        let decoded =
            Parameter::from_cbor_with(&Cbor::tagged(TAG_PARAMETER, "to"), &registry).unwrap();
        assert_eq!(decoded, Parameter::new_named("to"));
    }

    #[test]
    fn decode_rejects_other_role_tag() {
        let wire = Parameter::from_code(1).to_cbor();
        match Function::from_cbor(&wire) {
            Err(ExpressionError::InvalidTag { expected, found }) => {
                assert_eq!(expected, TAG_FUNCTION);
                assert_eq!(found, Some(TAG_PARAMETER));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decode_rejects_untagged() {
        assert!(matches!(
            Function::from_cbor(&Cbor::Unsigned(1)),
            Err(ExpressionError::InvalidTag { found: None, .. })
        ));
    }

    #[test]
    fn decode_rejects_other_inner_shapes() {
        for inner in [Cbor::Negative(-1), Cbor::Bool(true), Cbor::Bytes(vec![1])] {
            let wire = Cbor::Tagged(TAG_FUNCTION, Box::new(inner));
            assert!(matches!(
                Function::from_cbor(&wire),
                Err(ExpressionError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn global_decode_uses_well_known_names() {
        let decoded = Function::try_from(Cbor::tagged(TAG_FUNCTION, 3u64)).unwrap();
        assert_eq!(decoded, function::MUL);
        assert_eq!(decoded.name(), Some("mul"));
    }

    #[test]
    fn envelope_conversion() {
        let envelope = Envelope::from(Parameter::new_named("x"));
        assert_eq!(Parameter::from_envelope(&envelope).unwrap(), Parameter::new_named("x"));
        let wrong = Envelope::from(Function::from_code(1));
        assert!(matches!(
            Parameter::from_envelope(&wrong),
            Err(EnvelopeError::Cbor(CborError::WrongTag { .. }))
        ));
    }
}
