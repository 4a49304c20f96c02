use std::collections::BTreeMap;

use esi_core::{ConversionError, ValidationError};
use thiserror::Error;

use crate::response::{error_limit_remain, error_limit_reset, ResponseBody};

#[derive(Debug, Error)]
pub enum CallError {
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ScopeRequired(#[from] ScopeRequired),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("no value for path parameter `{0}`")]
    MissingPathParameter(String),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation `{operation}` requires scopes that are not enabled: {}", .missing.join(", "))]
pub struct ScopeRequired {
    pub operation: String,
    pub missing: Vec<String>,
}

/// A response whose status is outside `200..400`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("server responded with status {status}")]
pub struct ResponseError {
    pub status: u16,
    pub data: ResponseBody,
    pub headers: BTreeMap<String, String>,
}

impl ResponseError {
    pub fn error_limit_remain(&self) -> u32 {
        error_limit_remain(&self.headers)
    }

    pub fn error_limit_reset(&self) -> u32 {
        error_limit_reset(&self.headers)
    }
}
