use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ErrorCode, ErrorLeaf, ValidationError};
use crate::schema::Node;
use crate::types::string::json_type_name;
use crate::types::{bound_param, type_error};
use crate::value::NativeValue;

const INT32_BOUNDARY: f64 = i32::MAX as f64;
const INT64_BOUNDARY: f64 = i64::MAX as f64;

pub(crate) fn validate_integer(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    match value {
        NativeValue::Integer(i) => check_range(node, *i as f64),
        _ => Err(type_error(node)),
    }
}

/// Integers are accepted where a number is expected.
pub(crate) fn validate_number(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    match value {
        NativeValue::Number(f) => check_range(node, *f),
        NativeValue::Integer(i) => check_range(node, *i as f64),
        _ => Err(type_error(node)),
    }
}

/// Declared bounds, clipped to the signed range of `int32`/`int64` when that format is set.
pub(crate) fn effective_bounds(node: Node<'_>) -> (Option<f64>, Option<f64>) {
    let schema = node.schema();
    let boundary = match node.format() {
        Some("int32") => Some(INT32_BOUNDARY),
        Some("int64") => Some(INT64_BOUNDARY),
        _ => None,
    };
    match boundary {
        Some(b) => (
            Some(schema.minimum.map_or(-b, |m| m.max(-b))),
            Some(schema.maximum.map_or(b, |m| m.min(b))),
        ),
        None => (schema.minimum, schema.maximum),
    }
}

fn check_range(node: Node<'_>, value: f64) -> Result<(), ValidationError> {
    let (min, max) = effective_bounds(node);
    let below = min.is_some_and(|m| value < m);
    let above = max.is_some_and(|m| value > m);
    if below || above {
        return Err(ValidationError::leaf(
            ErrorLeaf::new("Value not within allowed range: {min} - {max}", ErrorCode::Value)
                .with_param("min", bound_param(min))
                .with_param("max", bound_param(max)),
        ));
    }
    Ok(())
}

pub(crate) fn integer_wire_to_native(value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match value {
        JsonValue::Null => Ok(NativeValue::Null),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(NativeValue::Integer(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < INT64_BOUNDARY => {
                    Ok(NativeValue::Integer(f as i64))
                }
                _ => Err(ConversionError::unexpected("integer", n.to_string())),
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map(NativeValue::Integer)
            .map_err(|_| ConversionError::unexpected("integer", s.clone())),
        other => Err(ConversionError::unexpected("integer", json_type_name(other))),
    }
}

pub(crate) fn number_wire_to_native(value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match value {
        JsonValue::Null => Ok(NativeValue::Null),
        JsonValue::Number(n) => n
            .as_f64()
            .map(NativeValue::Number)
            .ok_or_else(|| ConversionError::unexpected("number", n.to_string())),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(NativeValue::Number)
            .map_err(|_| ConversionError::unexpected("number", s.clone())),
        other => Err(ConversionError::unexpected("number", json_type_name(other))),
    }
}

pub(crate) fn integer_native_to_wire(value: &NativeValue) -> Result<JsonValue, ConversionError> {
    match value {
        NativeValue::Null => Ok(JsonValue::Null),
        NativeValue::Integer(i) => Ok(JsonValue::from(*i)),
        NativeValue::Number(f) if f.fract() == 0.0 && f.abs() < INT64_BOUNDARY => {
            Ok(JsonValue::from(*f as i64))
        }
        other => Err(ConversionError::unexpected("integer", other.type_name())),
    }
}

pub(crate) fn number_native_to_wire(value: &NativeValue) -> Result<JsonValue, ConversionError> {
    let f = match value {
        NativeValue::Null => return Ok(JsonValue::Null),
        NativeValue::Number(f) => *f,
        NativeValue::Integer(i) => *i as f64,
        other => return Err(ConversionError::unexpected("number", other.type_name())),
    };
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .ok_or_else(|| ConversionError::unexpected("finite number", f.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::ErrorCode;
    use crate::schema::SchemaGraph;
    use crate::value::NativeValue;

    #[test]
    fn int32_clips_without_declared_bounds() {
        let (graph, id) =
            SchemaGraph::from_fragment(&json!({"type": "integer", "format": "int32"})).unwrap();
        let node = graph.node(id);
        node.validate(&NativeValue::Integer(i64::from(i32::MAX))).unwrap();
        node.validate(&NativeValue::Integer(i64::from(i32::MIN) + 1)).unwrap();
        let err = node.validate(&NativeValue::Integer(1 << 40)).unwrap_err();
        let flat = err.flatten();
        let leaf = flat[0].1;
        assert_eq!(leaf.code, ErrorCode::Value);
        assert_eq!(leaf.params["max"], json!(2147483647));
        assert_eq!(leaf.params["min"], json!(-2147483647));
    }

    #[test]
    fn int32_clips_wider_declared_range() {
        let (graph, id) = SchemaGraph::from_fragment(
            &json!({"type": "integer", "format": "int32", "maximum": 1e12}),
        )
        .unwrap();
        assert!(graph.node(id).validate(&NativeValue::Integer(1 << 32)).is_err());
    }

    #[test]
    fn int64_accepts_large_values() {
        let (graph, id) =
            SchemaGraph::from_fragment(&json!({"type": "integer", "format": "int64"})).unwrap();
        graph.node(id).validate(&NativeValue::Integer(1 << 40)).unwrap();
        graph.node(id).validate(&NativeValue::Integer(i64::MAX)).unwrap();
    }

    #[test]
    fn declared_zero_minimum_is_enforced() {
        let (graph, id) =
            SchemaGraph::from_fragment(&json!({"type": "integer", "minimum": 0})).unwrap();
        assert!(graph.node(id).validate(&NativeValue::Integer(-1)).is_err());
        graph.node(id).validate(&NativeValue::Integer(0)).unwrap();
    }

    #[test]
    fn number_accepts_integers_and_rejects_text() {
        let (graph, id) =
            SchemaGraph::from_fragment(&json!({"type": "number", "maximum": 1.5})).unwrap();
        let node = graph.node(id);
        node.validate(&NativeValue::Integer(1)).unwrap();
        assert!(node.validate(&NativeValue::Number(1.75)).is_err());
        assert!(node.validate(&NativeValue::Text("1".into())).is_err());
    }
}
