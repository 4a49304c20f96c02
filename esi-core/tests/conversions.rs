use chrono::{DateTime, NaiveDate};
use esi_core::{NativeType, NativeValue, SchemaGraph};
use serde_json::{json, Value};

fn round_trip(fragment: Value, wire: Value, native: NativeValue) {
    let (graph, id) = SchemaGraph::from_fragment(&fragment).unwrap();
    let node = graph.node(id);

    let decoded = node.wire_to_native(&wire).unwrap();
    assert_eq!(decoded, native, "decoding {wire} with {fragment}");
    node.validate(&decoded).unwrap();
    assert_eq!(node.native_to_wire(&decoded).unwrap(), wire);
    assert_eq!(node.wire_to_native(&node.native_to_wire(&native).unwrap()).unwrap(), native);
}

#[test]
fn primitive_kinds_round_trip() {
    round_trip(json!({"type": "string"}), json!("Jita"), NativeValue::from("Jita"));
    round_trip(
        json!({"type": "string", "format": "date"}),
        json!("2003-05-06"),
        NativeValue::Date(NaiveDate::from_ymd_opt(2003, 5, 6).unwrap()),
    );
    round_trip(
        json!({"type": "string", "format": "date-time"}),
        json!("2003-05-06T11:00:00+00:00"),
        NativeValue::DateTime(DateTime::parse_from_rfc3339("2003-05-06T11:00:00Z").unwrap()),
    );
    round_trip(
        json!({"type": "string", "format": "byte"}),
        json!("aGVsbG8="),
        NativeValue::Bytes(b"hello".to_vec()),
    );
    round_trip(json!({"type": "integer", "format": "int64"}), json!(90000001), NativeValue::Integer(90000001));
    round_trip(json!({"type": "number", "format": "float"}), json!(0.5), NativeValue::Number(0.5));
    round_trip(json!({"type": "boolean"}), json!(true), NativeValue::Bool(true));
}

#[test]
fn nested_object_decodes_each_property() {
    let fragment = json!({
        "type": "object",
        "required": ["killmail_time", "victim"],
        "properties": {
            "killmail_time": {"type": "string", "format": "date-time"},
            "victim": {
                "type": "object",
                "required": ["ship_type_id"],
                "properties": {
                    "ship_type_id": {"type": "integer", "format": "int32"},
                    "items": {"type": "array", "items": {"type": "integer"}}
                }
            }
        }
    });
    let (graph, id) = SchemaGraph::from_fragment(&fragment).unwrap();
    let node = graph.node(id);
    let native = node
        .wire_to_native(&json!({
            "killmail_time": "2018-01-01T00:00:00Z",
            "victim": {"ship_type_id": 587, "items": [1, 2]}
        }))
        .unwrap();
    node.validate(&native).unwrap();

    let map = native.as_object().unwrap();
    assert!(matches!(map["killmail_time"], NativeValue::DateTime(_)));
    assert_eq!(
        map["victim"].as_object().unwrap()["items"],
        NativeValue::Array(vec![NativeValue::Integer(1), NativeValue::Integer(2)])
    );
}

#[test]
fn nested_failures_are_reported_by_path() {
    let fragment = json!({
        "type": "object",
        "required": ["victim"],
        "properties": {
            "victim": {
                "type": "object",
                "required": ["ship_type_id"],
                "properties": {
                    "ship_type_id": {"type": "integer"},
                    "items": {"type": "array", "items": {"type": "integer", "format": "int32"}}
                }
            }
        }
    });
    let (graph, id) = SchemaGraph::from_fragment(&fragment).unwrap();
    let native = NativeValue::from(json!({"victim": {"items": [1, 4294967296i64, "x"]}}));
    let err = graph.node(id).validate(&native).unwrap_err();

    let paths: Vec<String> = err.flatten().into_iter().map(|(path, _)| path).collect();
    assert_eq!(err.len(), 3);
    assert!(paths.contains(&"victim.ship_type_id".to_string()));
    assert!(paths.contains(&"victim.items[1]".to_string()));
    assert!(paths.contains(&"victim.items[2]".to_string()));
}

#[test]
fn inferred_native_types() {
    let (graph, id) = SchemaGraph::from_fragment(&json!({
        "type": "array",
        "items": {"type": "array", "items": {"type": "number"}}
    }))
    .unwrap();
    assert_eq!(
        graph.node(id).inferred_type(),
        NativeType::Sequence(Box::new(NativeType::Sequence(Box::new(NativeType::Float))))
    );
    let (graph, id) = SchemaGraph::from_fragment(&json!({"schema": {"type": "boolean"}})).unwrap();
    assert_eq!(graph.node(id).inferred_type(), NativeType::Boolean);
}
