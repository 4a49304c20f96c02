use std::collections::BTreeMap;

use esi_core::{
    ErrorCode, ErrorCollector, ErrorLeaf, NativeValue, Operation, ParameterLocation, SpecDocument,
    ValidationError,
};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{CallError, ScopeRequired};

/// Call arguments keyed by each parameter's safe name.
pub type CallArgs = BTreeMap<String, NativeValue>;

/// Wire values bucketed by location, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct RequestParts {
    pub path: BTreeMap<String, JsonValue>,
    pub query: BTreeMap<String, JsonValue>,
    pub header: BTreeMap<String, JsonValue>,
    pub body: BTreeMap<String, JsonValue>,
}

impl RequestParts {
    pub fn bucket(&self, location: ParameterLocation) -> &BTreeMap<String, JsonValue> {
        match location {
            ParameterLocation::Path => &self.path,
            ParameterLocation::Query => &self.query,
            ParameterLocation::Header => &self.header,
            ParameterLocation::Body => &self.body,
        }
    }

    fn bucket_mut(&mut self, location: ParameterLocation) -> &mut BTreeMap<String, JsonValue> {
        match location {
            ParameterLocation::Path => &mut self.path,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::Body => &mut self.body,
        }
    }

    /// The request body: the single body value when there is one, else every body value keyed
    /// by name.
    pub fn json_body(&self) -> Option<JsonValue> {
        match self.body.len() {
            0 => None,
            1 => self.body.values().next().cloned(),
            _ => Some(JsonValue::Object(
                self.body.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
        }
    }
}

/// Validates every argument and places it in its wire location.
///
/// Arguments equal to their parameter's default are left out. Every failure is collected under
/// the argument's name before the call is rejected.
pub fn marshal(
    doc: &SpecDocument,
    op: &Operation,
    mut args: CallArgs,
    skip_validation: bool,
) -> Result<RequestParts, CallError> {
    let mut parts = RequestParts::default();
    let mut errors = ErrorCollector::new();

    for param in op.ordered_parameters() {
        // An absent (or null) argument stands for the parameter's default.
        let Some(value) = args.remove(&param.safe_name).filter(|v| !v.is_null()) else {
            if param.required && !param.has_default() && !skip_validation {
                errors.nest(
                    param.safe_name.as_str(),
                    ValidationError::leaf(ErrorLeaf::new("Value is required", ErrorCode::Required)),
                );
            }
            continue;
        };

        if param.default.as_ref().is_some_and(|d| NativeValue::from(d) == value) {
            trace!(operation = %op.operation_id, param = %param.name, "argument equals default; not sent");
            continue;
        }

        let node = doc.node(param.node);
        if !skip_validation {
            if let Err(e) = node.validate(&value) {
                errors.nest(param.safe_name.as_str(), e);
                continue;
            }
        }
        let wire = node.native_to_wire(&value)?;
        parts.bucket_mut(param.location).insert(param.name.clone(), wire);
    }

    if !skip_validation {
        for name in args.keys() {
            errors.nest(
                name.as_str(),
                ValidationError::leaf(ErrorLeaf::new("Unexpected argument", ErrorCode::Unknown)),
            );
        }
    }

    if let Err(e) = errors.finish() {
        debug!(operation = %op.operation_id, errors = e.len(), "call arguments rejected");
        return Err(e.into());
    }
    Ok(parts)
}

/// Passes when the configured scopes cover everything `op` declares.
pub fn check_scopes(op: &Operation, config: &ClientConfig) -> Result<(), ScopeRequired> {
    let enabled = config.enabled_scopes.as_deref();
    if op.validate_scopes(enabled) {
        return Ok(());
    }
    Err(ScopeRequired {
        operation: op.operation_id.clone(),
        missing: op.missing_scopes(enabled),
    })
}
