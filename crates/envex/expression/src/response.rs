//! Response messages.
//!
//! A response's subject is `40005(cid)` echoing the request it answers.
//! Success carries one or more `result` assertions (an empty result list is
//! allowed and carries none); failure carries exactly one `error`. When the
//! request could not be correlated at all the subject is `40005("unknown")`
//! with an optional `error`.

use envex_envelope::known_value::{ERROR, OK, RESULT};
use envex_envelope::tags::TAG_RESPONSE;
use envex_envelope::{Cbor, Cid, Envelope};

use crate::error::ExpressionError;
use crate::extract::extract_many;
use crate::request::{cid_from, tagged_subject};

/// Subject content of a response that could not be correlated.
pub const UNKNOWN_ID: &str = "unknown";

fn subject(id: &Cid) -> Envelope {
    Envelope::new(Cbor::tagged(TAG_RESPONSE, id))
}

/// A successful response with a single result.
pub fn response(id: &Cid, result: impl Into<Envelope>) -> Envelope {
    subject(id).add_assertion(RESULT, result)
}

/// A successful response whose result is the `OK` sentinel.
pub fn ok_response(id: &Cid) -> Envelope {
    response(id, OK)
}

/// A successful response with one `result` assertion per item, in order.
pub fn response_with_results<I>(id: &Cid, results: I) -> Envelope
where
    I: IntoIterator,
    I::Item: Into<Envelope>,
{
    results
        .into_iter()
        .fold(subject(id), |envelope, result| envelope.add_assertion(RESULT, result))
}

/// A failed response carrying `error`.
pub fn error_response(id: &Cid, error: impl Into<Envelope>) -> Envelope {
    subject(id).add_assertion(ERROR, error)
}

/// A response to a request whose id could not be determined.
pub fn unknown_response(error: Option<Envelope>) -> Envelope {
    let envelope = Envelope::new(Cbor::tagged(TAG_RESPONSE, UNKNOWN_ID));
    match error {
        Some(error) => envelope.add_assertion(ERROR, error),
        None => envelope,
    }
}

/// The correlation id of a response; `None` for an unknown response.
pub fn response_id(envelope: &Envelope) -> Result<Option<Cid>, ExpressionError> {
    match tagged_subject(envelope, TAG_RESPONSE)? {
        Cbor::Text(text) if text == UNKNOWN_ID => Ok(None),
        inner => cid_from(inner).map(Some),
    }
}

/// Typed view of a response envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Success { id: Cid, results: Vec<Envelope> },
    Failure { id: Cid, error: Envelope },
    Unknown { error: Option<Envelope> },
}

impl Response {
    pub fn ok(id: Cid) -> Self {
        Self::Success {
            id,
            results: vec![Envelope::from(OK)],
        }
    }

    pub fn id(&self) -> Option<&Cid> {
        match self {
            Self::Success { id, .. } | Self::Failure { id, .. } => Some(id),
            Self::Unknown { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn to_envelope(&self) -> Envelope {
        match self {
            Self::Success { id, results } => response_with_results(id, results),
            Self::Failure { id, error } => error_response(id, error),
            Self::Unknown { error } => unknown_response(error.clone()),
        }
    }

    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ExpressionError> {
        let id = response_id(envelope)?;
        let results: Vec<Envelope> = extract_many(envelope, RESULT)?;
        let mut errors: Vec<Envelope> = extract_many(envelope, ERROR)?;
        if errors.len() > 1 {
            return Err(ExpressionError::WrongCardinality {
                predicate: ERROR.to_string(),
                count: errors.len(),
            });
        }
        let error = errors.pop();
        match (id, error) {
            (_, Some(_)) if !results.is_empty() => Err(ExpressionError::InvalidFormat(
                "response carries both result and error".into(),
            )),
            (Some(id), Some(error)) => Ok(Self::Failure { id, error }),
            (Some(id), None) => Ok(Self::Success { id, results }),
            (None, error) if results.is_empty() => Ok(Self::Unknown { error }),
            (None, _) => Err(ExpressionError::InvalidFormat(
                "uncorrelated response carries results".into(),
            )),
        }
    }
}

impl From<Response> for Envelope {
    fn from(response: Response) -> Self {
        response.to_envelope()
    }
}

impl TryFrom<&Envelope> for Response {
    type Error = ExpressionError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        Self::from_envelope(envelope)
    }
}
