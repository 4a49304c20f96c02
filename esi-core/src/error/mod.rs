mod validation;

use thiserror::Error;

pub use validation::{ErrorCode, ErrorCollector, ErrorLeaf, ValidationError, SELF_KEY};

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid spec: {0}")]
    InvalidSpec(String),
    #[error(transparent)]
    Ref(#[from] RefError),
    #[error("operation `{method} {path}` has no operationId")]
    MissingOperationId { method: String, path: String },
    #[error("invalid parameter at {context}: {message}")]
    InvalidParameter { context: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    #[error("unsupported external $ref: {0}")]
    External(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
    #[error("$ref chain deeper than {limit} at {pointer}")]
    TooDeep { pointer: String, limit: usize },
}

/// Failures while converting between wire and native form that are not validation failures.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid date `{value}`: {source}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid date-time `{value}`: {source}")]
    DateTime {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("timestamp {0} is out of range")]
    Timestamp(i64),
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },
}

impl ConversionError {
    pub(crate) fn unexpected(expected: &'static str, found: impl Into<String>) -> Self {
        ConversionError::UnexpectedType {
            expected,
            found: found.into(),
        }
    }
}
