use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ErrorCollector, ErrorCode, ErrorLeaf, ValidationError};
use crate::schema::Node;
use crate::types::string::json_type_name;
use crate::types::type_error;
use crate::value::NativeValue;

/// Only a node declared `type: object` insists on a mapping; untyped nodes accept anything.
pub(crate) fn validate(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    let NativeValue::Object(map) = value else {
        return if node.schema().declared_type.as_deref() == Some("object") {
            Err(type_error(node))
        } else {
            Ok(())
        };
    };

    let mut errors = ErrorCollector::new();
    if let Some(props) = node.properties() {
        for (name, prop) in props {
            if let Some(v) = map.get(name) {
                if let Err(e) = prop.validate(v) {
                    errors.nest(name, e);
                }
            }
        }
    }
    for name in &node.schema().required_properties {
        if !map.contains_key(name) {
            errors.nest(
                name.as_str(),
                ValidationError::leaf(ErrorLeaf::new("Value is required", ErrorCode::Required)),
            );
        }
    }
    errors.finish()
}

/// Declared properties only; an absent key takes the property's default when it has one.
pub(crate) fn wire_to_native(node: Node<'_>, value: &JsonValue) -> Result<NativeValue, ConversionError> {
    let Some(props) = node.properties() else {
        return Ok(NativeValue::from(value));
    };
    let map = match value {
        JsonValue::Null => return Ok(NativeValue::Null),
        JsonValue::Object(map) => map,
        other => return Err(ConversionError::unexpected("object", json_type_name(other))),
    };

    let mut out = BTreeMap::new();
    for (name, prop) in props {
        let raw = match map.get(name) {
            Some(v) => v,
            None => match &prop.schema().default {
                Some(default) if !default.is_null() => default,
                _ => continue,
            },
        };
        out.insert(name.to_string(), prop.wire_to_native(raw)?);
    }
    Ok(NativeValue::Object(out))
}

/// Declared properties present in the value; defaults are not filled in.
pub(crate) fn native_to_wire(node: Node<'_>, value: &NativeValue) -> Result<JsonValue, ConversionError> {
    let Some(props) = node.properties() else {
        return Ok(value.to_json());
    };
    let map = match value {
        NativeValue::Null => return Ok(JsonValue::Null),
        NativeValue::Object(map) => map,
        other => return Err(ConversionError::unexpected("object", other.type_name())),
    };

    let mut out = serde_json::Map::new();
    for (name, prop) in props {
        if let Some(v) = map.get(name) {
            out.insert(name.to_string(), prop.native_to_wire(v)?);
        }
    }
    Ok(JsonValue::Object(out))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::error::ErrorCode;
    use crate::schema::SchemaGraph;
    use crate::value::NativeValue;

    fn character_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "required": ["name", "corporation_id"],
            "properties": {
                "name": {"type": "string"},
                "corporation_id": {"type": "integer", "format": "int32"},
                "security_status": {"type": "number", "default": 0.0},
                "birthday": {"type": "string", "format": "date-time"}
            }
        })
    }

    #[test]
    fn one_error_per_missing_required_property() {
        let (graph, id) = SchemaGraph::from_fragment(&character_schema()).unwrap();
        let err = graph
            .node(id)
            .validate(&NativeValue::Object(BTreeMap::new()))
            .unwrap_err();
        assert_eq!(err.len(), 2);
        for (path, leaf) in err.flatten() {
            assert!(path == "name" || path == "corporation_id");
            assert_eq!(leaf.code, ErrorCode::Required);
        }
    }

    #[test]
    fn extra_properties_are_ignored() {
        let (graph, id) = SchemaGraph::from_fragment(&character_schema()).unwrap();
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), NativeValue::from("CCP Bartender"));
        map.insert("corporation_id".to_string(), NativeValue::Integer(109299958));
        map.insert("alliance".to_string(), NativeValue::Bool(true));
        graph.node(id).validate(&NativeValue::Object(map)).unwrap();
    }

    #[test]
    fn wire_to_native_fills_defaults_but_native_to_wire_does_not() {
        let (graph, id) = SchemaGraph::from_fragment(&character_schema()).unwrap();
        let node = graph.node(id);
        let native = node
            .wire_to_native(&json!({"name": "a", "corporation_id": 1, "birthday": "2003-05-06T11:00:00Z"}))
            .unwrap();
        let map = native.as_object().unwrap();
        assert_eq!(map["security_status"], NativeValue::Number(0.0));
        assert!(matches!(map["birthday"], NativeValue::DateTime(_)));

        let mut partial = BTreeMap::new();
        partial.insert("name".to_string(), NativeValue::from("a"));
        assert_eq!(node.native_to_wire(&NativeValue::Object(partial)).unwrap(), json!({"name": "a"}));
    }

    #[test]
    fn untyped_node_is_opaque() {
        let (graph, id) = SchemaGraph::from_fragment(&json!({"description": "anything"})).unwrap();
        let node = graph.node(id);
        node.validate(&NativeValue::Integer(4)).unwrap();
        assert_eq!(node.wire_to_native(&json!([1, "a"])).unwrap(), NativeValue::from(json!([1, "a"])));
    }
}
