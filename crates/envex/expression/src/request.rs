//! Request messages.
//!
//! A request is an envelope whose subject is `40004(cid)` and which carries
//! exactly one `body` assertion, normally an expression:
//!
//! ```text
//! 40004(40012(h'…')) [
//!     'body': «add» [❰lhs❱: 2, ❰rhs❱: 3]
//! ]
//! ```

use envex_envelope::known_value::BODY;
use envex_envelope::tags::TAG_REQUEST;
use envex_envelope::{Cbor, Cid, Envelope, FromEnvelope};

use crate::error::ExpressionError;
use crate::extract::extract_one;

/// Build a request envelope correlated by `id`.
pub fn request(id: &Cid, body: impl Into<Envelope>) -> Envelope {
    Envelope::new(Cbor::tagged(TAG_REQUEST, id)).add_assertion(BODY, body)
}

/// The correlation id of a request.
pub fn request_id(envelope: &Envelope) -> Result<Cid, ExpressionError> {
    let inner = tagged_subject(envelope, TAG_REQUEST)?;
    cid_from(inner)
}

/// The single `body` of a request.
pub fn request_body<T: FromEnvelope>(envelope: &Envelope) -> Result<T, ExpressionError> {
    extract_one(envelope, BODY)
}

/// Typed view of a request envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    id: Cid,
    body: Envelope,
}

impl Request {
    pub fn new(id: Cid, body: impl Into<Envelope>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }

    pub fn id(&self) -> &Cid {
        &self.id
    }

    pub fn body(&self) -> &Envelope {
        &self.body
    }

    pub fn to_envelope(&self) -> Envelope {
        request(&self.id, &self.body)
    }

    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ExpressionError> {
        Ok(Self {
            id: request_id(envelope)?,
            body: request_body(envelope)?,
        })
    }
}

impl From<Request> for Envelope {
    fn from(request: Request) -> Self {
        request.to_envelope()
    }
}

impl TryFrom<&Envelope> for Request {
    type Error = ExpressionError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        Self::from_envelope(envelope)
    }
}

/// The content of `envelope`'s subject, which must carry `tag`.
pub(crate) fn tagged_subject(envelope: &Envelope, tag: u64) -> Result<&Cbor, ExpressionError> {
    match envelope.subject().as_tagged() {
        Some((found, inner)) if found == tag => Ok(inner),
        Some((found, _)) => Err(ExpressionError::InvalidTag {
            expected: tag,
            found: Some(found),
        }),
        None => Err(ExpressionError::InvalidTag {
            expected: tag,
            found: None,
        }),
    }
}

pub(crate) fn cid_from(cbor: &Cbor) -> Result<Cid, ExpressionError> {
    Cid::try_from(cbor.clone())
        .map_err(|e| ExpressionError::InvalidFormat(format!("correlation id: {}", e)))
}
