use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ErrorCode, ErrorLeaf, ValidationError};
use crate::schema::Node;
use crate::types::string::json_type_name;
use crate::value::NativeValue;

pub(crate) fn validate(_node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    match value {
        NativeValue::Bool(_) => Ok(()),
        _ => Err(ValidationError::leaf(ErrorLeaf::new(
            "Value not within expected options",
            ErrorCode::Value,
        ))),
    }
}

pub(crate) fn wire_to_native(value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match value {
        JsonValue::Null => Ok(NativeValue::Null),
        JsonValue::Bool(b) => Ok(NativeValue::Bool(*b)),
        JsonValue::String(s) if s == "true" => Ok(NativeValue::Bool(true)),
        JsonValue::String(s) if s == "false" => Ok(NativeValue::Bool(false)),
        other => Err(ConversionError::unexpected("boolean", json_type_name(other))),
    }
}

pub(crate) fn native_to_wire(value: &NativeValue) -> Result<JsonValue, ConversionError> {
    match value {
        NativeValue::Null => Ok(JsonValue::Null),
        NativeValue::Bool(b) => Ok(JsonValue::Bool(*b)),
        other => Err(ConversionError::unexpected("boolean", other.type_name())),
    }
}
