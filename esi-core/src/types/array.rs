use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ErrorCollector, ErrorCode, ErrorLeaf, ValidationError};
use crate::schema::Node;
use crate::types::string::json_type_name;
use crate::types::{count_param, type_error};
use crate::value::NativeValue;

pub(crate) fn validate(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    let NativeValue::Array(items) = value else {
        return Err(type_error(node));
    };
    let schema = node.schema();
    let mut errors = ErrorCollector::new();

    // `minimum` doubles as a lower length bound when `minItems` is absent.
    let min = schema
        .min_items
        .or_else(|| schema.minimum.filter(|m| *m >= 0.0).map(|m| m as u64));
    let max = schema.max_items;
    let len = items.len() as u64;
    if min.is_some_and(|m| len < m) || max.is_some_and(|m| len > m) {
        errors.push(
            ErrorLeaf::new("Value length not within allowed range: {min} - {max}", ErrorCode::Value)
                .with_param("min", count_param(min))
                .with_param("max", count_param(max)),
        );
    }
    if schema.unique_items && has_duplicates(items) {
        errors.push(ErrorLeaf::new("Values are not unique", ErrorCode::Value));
    }

    if let Some(item) = node.items() {
        for (idx, element) in items.iter().enumerate() {
            if let Err(e) = item.validate(element) {
                errors.nest(format!("[{idx}]"), e);
            }
        }
    }
    errors.finish()
}

fn has_duplicates(items: &[NativeValue]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].iter().any(|b| a == b))
}

pub(crate) fn wire_to_native(node: Node<'_>, value: &JsonValue) -> Result<NativeValue, ConversionError> {
    let elements = match value {
        JsonValue::Null => return Ok(NativeValue::Null),
        JsonValue::Array(elements) => elements,
        other => return Err(ConversionError::unexpected("array", json_type_name(other))),
    };
    let converted = match node.items() {
        Some(item) => elements
            .iter()
            .map(|e| item.wire_to_native(e))
            .collect::<Result<Vec<_>, _>>()?,
        None => elements.iter().map(NativeValue::from).collect(),
    };
    Ok(NativeValue::Array(converted))
}

pub(crate) fn native_to_wire(node: Node<'_>, value: &NativeValue) -> Result<JsonValue, ConversionError> {
    let elements = match value {
        NativeValue::Null => return Ok(JsonValue::Null),
        NativeValue::Array(elements) => elements,
        other => return Err(ConversionError::unexpected("array", other.type_name())),
    };
    let converted = match node.items() {
        Some(item) => elements
            .iter()
            .map(|e| item.native_to_wire(e))
            .collect::<Result<Vec<_>, _>>()?,
        None => elements.iter().map(NativeValue::to_json).collect(),
    };
    Ok(JsonValue::Array(converted))
}
