//! The type registry: per-kind validation and wire/native conversion.
//!
//! Each declared `type` maps to one [`SchemaKind`]; unknown or missing types behave as an
//! opaque object.

mod array;
mod boolean;
mod numeric;
mod object;
mod reference;
mod string;

use std::fmt;

use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ErrorCode, ErrorLeaf, ValidationError};
use crate::schema::{Node, NodeId};
use crate::value::NativeValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    #[default]
    Object,
    Schema,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 7] = [
        SchemaKind::String,
        SchemaKind::Integer,
        SchemaKind::Number,
        SchemaKind::Boolean,
        SchemaKind::Array,
        SchemaKind::Object,
        SchemaKind::Schema,
    ];

    /// Registry lookup; anything unrecognised falls back to [`SchemaKind::Object`].
    pub fn from_declared(declared: Option<&str>) -> SchemaKind {
        match declared {
            Some("string") => SchemaKind::String,
            Some("integer") => SchemaKind::Integer,
            Some("number") => SchemaKind::Number,
            Some("boolean") => SchemaKind::Boolean,
            Some("array") => SchemaKind::Array,
            Some("schema") => SchemaKind::Schema,
            _ => SchemaKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::Schema => "schema",
        }
    }

    pub(crate) fn validate(self, node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
        match self {
            SchemaKind::String => string::validate(node, value),
            SchemaKind::Integer => numeric::validate_integer(node, value),
            SchemaKind::Number => numeric::validate_number(node, value),
            SchemaKind::Boolean => boolean::validate(node, value),
            SchemaKind::Array => array::validate(node, value),
            SchemaKind::Object => object::validate(node, value),
            SchemaKind::Schema => reference::validate(node, value),
        }
    }

    pub(crate) fn wire_to_native(
        self,
        node: Node<'_>,
        value: &JsonValue,
    ) -> Result<NativeValue, ConversionError> {
        match self {
            SchemaKind::String => string::wire_to_native(node, value),
            SchemaKind::Integer => numeric::integer_wire_to_native(value),
            SchemaKind::Number => numeric::number_wire_to_native(value),
            SchemaKind::Boolean => boolean::wire_to_native(value),
            SchemaKind::Array => array::wire_to_native(node, value),
            SchemaKind::Object => object::wire_to_native(node, value),
            SchemaKind::Schema => reference::wire_to_native(node, value),
        }
    }

    pub(crate) fn native_to_wire(
        self,
        node: Node<'_>,
        value: &NativeValue,
    ) -> Result<JsonValue, ConversionError> {
        match self {
            SchemaKind::String => string::native_to_wire(node, value),
            SchemaKind::Integer => numeric::integer_native_to_wire(value),
            SchemaKind::Number => numeric::number_native_to_wire(value),
            SchemaKind::Boolean => boolean::native_to_wire(value),
            SchemaKind::Array => array::native_to_wire(node, value),
            SchemaKind::Object => object::native_to_wire(node, value),
            SchemaKind::Schema => reference::native_to_wire(node, value),
        }
    }

    /// `seen` holds the nodes on the current path so self-referencing schemas terminate.
    pub(crate) fn inferred_type(self, node: Node<'_>, seen: &mut Vec<NodeId>) -> NativeType {
        if seen.contains(&node.id()) {
            return NativeType::Any;
        }
        seen.push(node.id());
        let ty = match self {
            SchemaKind::String => NativeType::Text,
            SchemaKind::Integer => NativeType::Integer,
            SchemaKind::Number => NativeType::Float,
            SchemaKind::Boolean => NativeType::Boolean,
            SchemaKind::Array => NativeType::Sequence(Box::new(match node.items() {
                Some(item) => item.kind().inferred_type(item, seen),
                None => NativeType::Any,
            })),
            SchemaKind::Object => NativeType::Mapping,
            SchemaKind::Schema => match node.referenced() {
                Some(target) => target.kind().inferred_type(target, seen),
                None => NativeType::Any,
            },
        };
        seen.pop();
        ty
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The native type a generated interface should declare for a node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    Text,
    Integer,
    Float,
    Boolean,
    Sequence(Box<NativeType>),
    /// Text keys to arbitrary values.
    Mapping,
    Any,
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Text => f.write_str("String"),
            NativeType::Integer => f.write_str("i64"),
            NativeType::Float => f.write_str("f64"),
            NativeType::Boolean => f.write_str("bool"),
            NativeType::Sequence(inner) => write!(f, "Vec<{inner}>"),
            NativeType::Mapping => f.write_str("Map<String, Value>"),
            NativeType::Any => f.write_str("Value"),
        }
    }
}

pub(crate) fn type_error(node: Node<'_>) -> ValidationError {
    ValidationError::leaf(
        ErrorLeaf::new("Invalid type: {type}", ErrorCode::TypeError).with_param("type", node.type_label()),
    )
}

/// Bound rendered as an integer when it has no fractional part.
pub(crate) fn bound_param(bound: Option<f64>) -> JsonValue {
    match bound {
        Some(b) if b.fract() == 0.0 && b.abs() < 9.3e18 => JsonValue::from(b as i64),
        Some(b) => serde_json::Number::from_f64(b)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        None => JsonValue::Null,
    }
}

/// Bound on a `u64` count as a message param.
pub(crate) fn count_param(bound: Option<u64>) -> JsonValue {
    bound.map(JsonValue::from).unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_fall_back_to_object() {
        assert_eq!(SchemaKind::from_declared(None), SchemaKind::Object);
        assert_eq!(SchemaKind::from_declared(Some("file")), SchemaKind::Object);
        for kind in SchemaKind::ALL {
            assert_eq!(SchemaKind::from_declared(Some(kind.as_str())), kind);
        }
    }

    #[test]
    fn native_type_names() {
        let ty = NativeType::Sequence(Box::new(NativeType::Integer));
        assert_eq!(ty.to_string(), "Vec<i64>");
        assert_eq!(NativeType::Mapping.to_string(), "Map<String, Value>");
    }
}
