//! `schema` kind: everything is delegated to the referenced node. A schema node without a
//! target behaves as an opaque object.

use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ValidationError};
use crate::schema::Node;
use crate::types::object;
use crate::value::NativeValue;

pub(crate) fn validate(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    match node.referenced() {
        Some(target) => target.validate(value),
        None => object::validate(node, value),
    }
}

pub(crate) fn wire_to_native(node: Node<'_>, value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match node.referenced() {
        Some(target) => target.wire_to_native(value),
        None => object::wire_to_native(node, value),
    }
}

pub(crate) fn native_to_wire(node: Node<'_>, value: &NativeValue) -> Result<JsonValue, ConversionError> {
    match node.referenced() {
        Some(target) => target.native_to_wire(value),
        None => object::native_to_wire(node, value),
    }
}
