#![deny(unsafe_code)]
//! # envex-envelope
//!
//! Assertion envelopes over canonical tagged CBOR.
//!
//! An [`Envelope`] is a subject value carrying zero or more
//! predicate/object [`Assertion`]s, where both sides are envelopes in turn.
//! This crate supplies the value model the expression layer builds on:
//!
//! - [`Cbor`]: CBOR data items with a strict canonical codec
//! - [`tags`]: reserved tag numbers
//! - [`known_value`]: registered predicate values (`body`, `result`, `error`, `OK`)
//! - [`Cid`]: correlation ids for request/response pairs
//! - [`Digest`]: BLAKE3 identity of envelopes

pub mod cbor;
pub mod cid;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod known_value;
pub mod tags;

pub use cbor::Cbor;
pub use cid::Cid;
pub use digest::Digest;
pub use envelope::{Assertion, Envelope, FromEnvelope};
pub use error::{CborError, EnvelopeError};
pub use known_value::KnownValue;
