use std::collections::BTreeMap;

use esi_core::{HttpMethod, Operation, SpecDocument};
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::call::{check_scopes, marshal, CallArgs, RequestParts};
use crate::config::{CallOptions, ClientConfig};
use crate::error::CallError;

/// Everything a transport needs to send one call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PreparedRequest {
    pub operation_id: String,
    pub method: HttpMethod,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl PreparedRequest {
    pub fn from_parts(config: &ClientConfig, op: &Operation, parts: &RequestParts) -> Result<Self, CallError> {
        let query: Vec<(String, String)> = parts
            .query
            .iter()
            .map(|(k, v)| (k.clone(), value_to_string(v)))
            .collect();
        let url = build_url(&config.root_url(), &config.base_path, &op.path, &parts.path, &query)?;

        let mut headers: BTreeMap<String, String> = parts
            .header
            .iter()
            .map(|(k, v)| (k.clone(), value_to_string(v)))
            .collect();
        if !parts.body.is_empty() && !has_header_ci(&headers, "content-type") {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if !has_header_ci(&headers, "user-agent") {
            headers.insert("User-Agent".to_string(), config.user_agent.clone());
        }
        if let Some(token) = &config.token {
            if !has_header_ci(&headers, "authorization") {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }

        Ok(PreparedRequest {
            operation_id: op.operation_id.clone(),
            method: op.method,
            url,
            headers,
            body: parts.json_body(),
        })
    }
}

/// Scope gate, argument marshalling and URL assembly for one call.
pub fn prepare_call(
    doc: &SpecDocument,
    config: &ClientConfig,
    operation_id: &str,
    args: CallArgs,
    options: CallOptions,
) -> Result<PreparedRequest, CallError> {
    let op = doc
        .operation(operation_id)
        .ok_or_else(|| CallError::UnknownOperation(operation_id.to_string()))?;
    if !options.ignore_scopes {
        check_scopes(op, config)?;
    }
    let parts = marshal(doc, op, args, options.skip_validation)?;
    let request = PreparedRequest::from_parts(config, op, &parts)?;
    debug!(operation = operation_id, method = %request.method, url = %request.url, "prepared call");
    Ok(request)
}

/// Lists are sent comma-separated.
fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items.iter().map(value_to_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn build_url(
    root_url: &str,
    base_path: &str,
    path_template: &str,
    path_params: &BTreeMap<String, JsonValue>,
    query: &[(String, String)],
) -> Result<Url, CallError> {
    let mut path = path_template.to_string();
    for (k, v) in path_params {
        path = path.replace(&format!("{{{k}}}"), &urlencoding::encode(&value_to_string(v)));
    }
    if let Some(start) = path.find('{') {
        let name = path[start + 1..].split('}').next().unwrap_or_default();
        return Err(CallError::MissingPathParameter(name.to_string()));
    }

    let mut url = Url::parse(root_url)?;
    url.set_path(&format!("{}{path}", base_path.trim_end_matches('/')));
    if !query.is_empty() {
        let mut qp = url.query_pairs_mut();
        for (k, v) in query {
            qp.append_pair(k, v);
        }
    }
    Ok(url)
}

fn has_header_ci(headers: &BTreeMap<String, String>, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}
