#![deny(unsafe_code)]
//! # envex-expression
//!
//! Function-call expressions and request/response messages encoded as
//! assertion envelopes.
//!
//! ## Identifiers
//!
//! Functions and parameters share one identifier shape, [`Identifier`],
//! instantiated per [`Role`]. An identifier is either *known* (a numeric code
//! plus an optional display name that takes no part in identity) or *named*
//! (an arbitrary string). On the wire both travel under the role's tag:
//!
//! ```text
//! 40006(1)            known function `add`
//! 40007("amount")     named parameter
//! ```
//!
//! Each role keeps a [`KnownRegistry`] used to restore display names when
//! decoding bare codes. Every decode has a `_with` form taking the registry
//! explicitly; the plain form uses the role's process-wide registry.
//!
//! ## Messages
//!
//! - [`expression`]: `«function» [❰parameter❱: argument, ...]`
//! - [`request`]: `40004(cid) ['body': expression]`
//! - [`response`]: `40005(cid) ['result': value, ...]`, `40005(cid) ['error': e]`,
//!   or the uncorrelated `40005("unknown")`
//!
//! ## Key Types
//!
//! - [`Function`] / [`Parameter`]: identifier roles
//! - [`ExpressionBuilder`]: expression construction
//! - [`Request`] / [`Response`]: typed message views
//! - [`RegistryConfig`]: registry entries loaded at startup
//! - [`ExpressionError`]: decode and extraction failures

pub mod codec;
pub mod config;
pub mod error;
pub mod expression;
pub mod extract;
pub mod function;
pub mod identifier;
pub mod parameter;
pub mod registry;
pub mod request;
pub mod response;

// Re-export primary types.
pub use config::{KnownEntry, RegistryConfig};
pub use error::{ConfigError, ExpressionError, RegistryError};
pub use expression::{
    add_parameter, function_envelope, function_of, function_of_with, object_for_parameter,
    objects_for_parameter, ExpressionBuilder,
};
pub use extract::{extract_many, extract_one, is_result_ok};
pub use function::{Function, FunctionRole};
pub use identifier::{Identifier, Role};
pub use parameter::{Parameter, ParameterRole};
pub use registry::KnownRegistry;
pub use request::{request, request_body, request_id, Request};
pub use response::{
    error_response, ok_response, response, response_id, response_with_results,
    unknown_response, Response, UNKNOWN_ID,
};
