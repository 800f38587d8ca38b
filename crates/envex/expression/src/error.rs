use envex_envelope::tags::tag_name;
use envex_envelope::EnvelopeError;
use thiserror::Error;

/// Errors from identifier decoding, message parsing and assertion extraction.
#[derive(Error, Debug)]
pub enum ExpressionError {
    #[error(
        "invalid tag: expected {}, found {}",
        describe_tag(Some(*expected)),
        describe_tag(*found)
    )]
    InvalidTag { expected: u64, found: Option<u64> },

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("no assertion with predicate {predicate}")]
    MissingAssertion { predicate: String },

    #[error("expected exactly one assertion with predicate {predicate}, found {count}")]
    WrongCardinality { predicate: String, count: usize },

    #[error("object of {predicate} has the wrong type: {source}")]
    TypeMismatch {
        predicate: String,
        #[source]
        source: EnvelopeError,
    },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
}

fn describe_tag(tag: Option<u64>) -> String {
    match tag {
        Some(tag) => match tag_name(tag) {
            Some(name) => format!("{} ({})", tag, name),
            None => tag.to_string(),
        },
        None => "untagged value".to_string(),
    }
}

/// Errors from the known-identifier registries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("cannot register named {kind} identifier \"{name}\"; only coded identifiers are registrable")]
    NamedIdentifier { kind: &'static str, name: String },
}

/// Errors from loading or applying registry configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid registry config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
