//! Cardinality-checked extraction of assertion objects.
//!
//! [`extract_one`] demands exactly one matching assertion; [`extract_many`]
//! accepts any number. Both decode the matched objects into the requested
//! type and abort on the first object that does not decode.

use std::fmt;

use envex_envelope::known_value::{ERROR, OK, RESULT};
use envex_envelope::{Envelope, FromEnvelope, KnownValue};

use crate::error::ExpressionError;

/// Decode the object of the single assertion matching `predicate`.
pub fn extract_one<T, P>(envelope: &Envelope, predicate: P) -> Result<T, ExpressionError>
where
    T: FromEnvelope,
    P: Into<Envelope> + fmt::Display,
{
    let label = predicate.to_string();
    let objects = envelope.objects_for_predicate(predicate);
    match objects.as_slice() {
        [] => Err(ExpressionError::MissingAssertion { predicate: label }),
        [object] => decode(object, &label),
        _ => Err(ExpressionError::WrongCardinality {
            predicate: label,
            count: objects.len(),
        }),
    }
}

/// Decode the objects of every assertion matching `predicate`.
///
/// Order follows the envelope's assertion order. No match yields an empty
/// list.
pub fn extract_many<T, P>(envelope: &Envelope, predicate: P) -> Result<Vec<T>, ExpressionError>
where
    T: FromEnvelope,
    P: Into<Envelope> + fmt::Display,
{
    let label = predicate.to_string();
    envelope
        .objects_for_predicate(predicate)
        .into_iter()
        .map(|object| decode(object, &label))
        .collect()
}

fn decode<T: FromEnvelope>(object: &Envelope, predicate: &str) -> Result<T, ExpressionError> {
    T::from_envelope(object).map_err(|source| ExpressionError::TypeMismatch {
        predicate: predicate.to_string(),
        source,
    })
}

/// The single `result` of a response.
pub fn result<T: FromEnvelope>(envelope: &Envelope) -> Result<T, ExpressionError> {
    extract_one(envelope, RESULT)
}

/// Every `result` of a response.
pub fn results<T: FromEnvelope>(envelope: &Envelope) -> Result<Vec<T>, ExpressionError> {
    extract_many(envelope, RESULT)
}

/// The single `error` of a response.
pub fn error<T: FromEnvelope>(envelope: &Envelope) -> Result<T, ExpressionError> {
    extract_one(envelope, ERROR)
}

/// Whether the response's single result is the `OK` sentinel.
///
/// A result of any other type or value is simply not OK. A missing or
/// repeated `result` assertion is an error.
pub fn is_result_ok(envelope: &Envelope) -> Result<bool, ExpressionError> {
    let object: Envelope = result(envelope)?;
    Ok(KnownValue::from_envelope(&object).is_ok_and(|value| value == OK))
}
