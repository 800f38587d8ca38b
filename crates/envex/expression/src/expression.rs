//! Function-call expressions.
//!
//! An expression is an envelope whose subject is a function identifier and
//! whose assertions bind parameter identifiers to argument values:
//!
//! ```text
//! «add» [
//!     ❰lhs❱: 2
//!     ❰rhs❱: 3
//! ]
//! ```

use envex_envelope::{Envelope, FromEnvelope};

use crate::error::ExpressionError;
use crate::extract::{extract_many, extract_one};
use crate::function::{Function, FunctionRole};
use crate::parameter::Parameter;
use crate::registry::KnownRegistry;

/// An expression envelope calling `function` with no arguments yet.
pub fn function_envelope(function: impl Into<Function>) -> Envelope {
    Envelope::from(function.into())
}

/// Bind `parameter` to `value` on an expression.
///
/// An absent value adds nothing and returns the envelope unchanged. A
/// present value adds exactly one assertion; existing assertions are kept.
pub fn add_parameter<V: Into<Envelope>>(
    envelope: Envelope,
    parameter: impl Into<Parameter>,
    value: Option<V>,
) -> Envelope {
    match value {
        Some(value) => envelope.add_assertion(parameter.into(), value),
        None => envelope,
    }
}

/// The function an expression calls, named via the global registry.
pub fn function_of(envelope: &Envelope) -> Result<Function, ExpressionError> {
    Function::from_cbor(envelope.subject())
}

/// The function an expression calls, named via `registry`.
pub fn function_of_with(
    envelope: &Envelope,
    registry: &KnownRegistry<FunctionRole>,
) -> Result<Function, ExpressionError> {
    Function::from_cbor_with(envelope.subject(), registry)
}

/// The argument bound to `parameter`, which must be bound exactly once.
pub fn object_for_parameter<T: FromEnvelope>(
    envelope: &Envelope,
    parameter: impl Into<Parameter>,
) -> Result<T, ExpressionError> {
    extract_one(envelope, parameter.into())
}

/// Every argument bound to `parameter`.
pub fn objects_for_parameter<T: FromEnvelope>(
    envelope: &Envelope,
    parameter: impl Into<Parameter>,
) -> Result<Vec<T>, ExpressionError> {
    extract_many(envelope, parameter.into())
}

/// Builder for expression envelopes.
pub struct ExpressionBuilder {
    envelope: Envelope,
}

impl ExpressionBuilder {
    pub fn new(function: impl Into<Function>) -> Self {
        Self {
            envelope: function_envelope(function),
        }
    }

    pub fn parameter(self, parameter: impl Into<Parameter>, value: impl Into<Envelope>) -> Self {
        self.optional_parameter(parameter, Some(value))
    }

    pub fn optional_parameter<V: Into<Envelope>>(
        mut self,
        parameter: impl Into<Parameter>,
        value: Option<V>,
    ) -> Self {
        self.envelope = add_parameter(self.envelope, parameter, value);
        self
    }

    pub fn build(self) -> Envelope {
        self.envelope
    }
}
