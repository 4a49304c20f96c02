use std::collections::BTreeMap;

use esi_core::{NativeValue, Operation, SpecDocument};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{CallError, ResponseError};

const NOT_MODIFIED: u16 = 304;

/// What the transport received.
#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    /// Decoded through the schema declared for the status.
    Decoded(NativeValue),
    /// No schema for the status, or the body was not JSON.
    Raw(JsonValue),
}

impl ResponseBody {
    pub fn to_json(&self) -> JsonValue {
        match self {
            ResponseBody::Empty => JsonValue::Null,
            ResponseBody::Decoded(v) => v.to_json(),
            ResponseBody::Raw(v) => v.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn error_limit_remain(&self) -> u32 {
        error_limit_remain(&self.headers)
    }

    pub fn error_limit_reset(&self) -> u32 {
        error_limit_reset(&self.headers)
    }
}

/// Decodes a raw response for `op`. With `raise_if_error`, a status outside `200..400` becomes
/// [`ResponseError`].
pub fn process_response(
    doc: &SpecDocument,
    op: &Operation,
    response: HttpResponseParts,
    raise_if_error: bool,
) -> Result<ApiResponse, CallError> {
    let HttpResponseParts { status, headers, body } = response;
    let body = decode_body(doc, op, status, &body)?;

    if raise_if_error && !is_success(status) {
        debug!(operation = %op.operation_id, status, "error response");
        return Err(ResponseError {
            status,
            data: body,
            headers,
        }
        .into());
    }
    Ok(ApiResponse { status, headers, body })
}

fn decode_body(doc: &SpecDocument, op: &Operation, status: u16, raw: &[u8]) -> Result<ResponseBody, CallError> {
    if status == NOT_MODIFIED || raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::Empty);
    }
    let json = match serde_json::from_slice::<JsonValue>(raw) {
        Ok(v) => v,
        Err(_) => return Ok(ResponseBody::Raw(JsonValue::String(String::from_utf8_lossy(raw).into_owned()))),
    };
    let Some(schema) = op.response(status) else {
        return Ok(ResponseBody::Raw(json));
    };
    match doc.node(schema).wire_to_native(&json) {
        Ok(native) => Ok(ResponseBody::Decoded(native)),
        // An error body that misses its schema is still reported with its status.
        Err(e) if !is_success(status) => {
            debug!(operation = %op.operation_id, status, error = %e, "error body kept raw");
            Ok(ResponseBody::Raw(json))
        }
        Err(e) => Err(e.into()),
    }
}

fn is_success(status: u16) -> bool {
    (200..400).contains(&status)
}

/// `X-Esi-Error-Limit-Remain`, or `1` when absent or malformed.
pub fn error_limit_remain(headers: &BTreeMap<String, String>) -> u32 {
    header_u32(headers, "x-esi-error-limit-remain")
}

/// `X-Esi-Error-Limit-Reset`, or `1` when absent or malformed.
pub fn error_limit_reset(headers: &BTreeMap<String, String>) -> u32 {
    header_u32(headers, "x-esi-error-limit-reset")
}

fn header_u32(headers: &BTreeMap<String, String>, name: &str) -> u32 {
    get_header_ci(headers, name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

fn get_header_ci<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_limit_headers_are_case_insensitive() {
        let mut headers = BTreeMap::new();
        headers.insert("X-ESI-Error-Limit-Remain".to_string(), "87".to_string());
        headers.insert("x-esi-error-limit-reset".to_string(), "soon".to_string());
        assert_eq!(error_limit_remain(&headers), 87);
        assert_eq!(error_limit_reset(&headers), 1);
        assert_eq!(error_limit_remain(&BTreeMap::new()), 1);
    }
}
