use esi_core::{
    HttpMethod, LoadOptions, NativeValue, ParameterLocation, RefError, SchemaKind, SpecDocument,
    SpecError,
};
use serde_json::json;

fn fixture() -> serde_json::Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "EVE Swagger Interface", "version": "1.2.3", "description": "An OpenAPI for EVE Online"},
        "host": "esi.evetech.net",
        "basePath": "/latest",
        "schemes": ["https"],
        "securityDefinitions": {
            "evesso": {
                "type": "oauth2",
                "scopes": {"esi-wallet.read_character_wallet.v1": "EVE SSO scope esi-wallet.read_character_wallet.v1"}
            }
        },
        "parameters": {
            "character_id": {"name": "character_id", "in": "path", "type": "integer", "format": "int32", "minimum": 1},
            "datasource": {"name": "datasource", "in": "query", "type": "string", "default": "tranquility", "enum": ["tranquility"]},
            "If-None-Match": {"name": "If-None-Match", "in": "header", "type": "string"}
        },
        "definitions": {
            "wallet_journal_entry": {
                "type": "object",
                "required": ["id", "date"],
                "properties": {
                    "id": {"type": "integer", "format": "int64"},
                    "date": {"type": "string", "format": "date-time"}
                }
            }
        },
        "paths": {
            "/characters/{character_id}/wallet/journal/": {
                "parameters": [
                    {"$ref": "#/parameters/character_id"},
                    {"name": "page", "in": "query", "type": "integer", "format": "int32", "default": 1}
                ],
                "get": {
                    "operationId": "get_characters_character_id_wallet_journal",
                    "summary": "Get character wallet journal",
                    "description": "Retrieve the given character's wallet journal\n\n---\nAlternate route: `/v6/`",
                    "tags": ["Wallet"],
                    "security": [{"evesso": ["esi-wallet.read_character_wallet.v1"]}],
                    "parameters": [
                        {"$ref": "#/parameters/datasource"},
                        {"$ref": "#/parameters/If-None-Match"},
                        {"name": "page", "in": "query", "type": "integer", "format": "int32", "default": 1, "minimum": 1},
                        {"name": "token", "in": "query", "type": "string"}
                    ],
                    "responses": {
                        "200": {"description": "ok", "schema": {"type": "array", "items": {"$ref": "#/definitions/wallet_journal_entry"}}},
                        "304": {"description": "Not modified"},
                        "default": {"description": "unexpected"}
                    }
                }
            },
            "/status/": {
                "x-cached-seconds": 30,
                "get": {
                    "operationId": "get_status",
                    "parameters": [{"$ref": "#/parameters/datasource"}],
                    "responses": {"200": {"description": "ok", "schema": {"type": "object"}}}
                }
            }
        }
    })
}

fn load() -> SpecDocument {
    SpecDocument::from_json(&fixture(), &LoadOptions::default()).unwrap()
}

#[test]
fn document_metadata() {
    let doc = load();
    let info = doc.info();
    assert_eq!(info.base_path, "/latest");
    assert_eq!(info.version.as_deref(), Some("1.2.3"));
    assert_eq!(info.valid_urls(), ["https://esi.evetech.net/latest"]);
    assert!(info.sso_scopes.contains_key("esi-wallet.read_character_wallet.v1"));
    assert_eq!(doc.operation_count(), 2);
}

#[test]
fn metadata_defaults() {
    let doc = SpecDocument::from_json(&json!({"swagger": "2.0", "paths": {}}), &LoadOptions::default()).unwrap();
    assert_eq!(doc.info().base_path, "/");
    assert_eq!(doc.info().schemes, ["https"]);
    assert_eq!(doc.info().title, "EVE Swagger Interface");
    assert!(doc.info().valid_urls().is_empty());
}

#[test]
fn globals_are_shared_with_operations() {
    let doc = load();
    let global = doc.global_parameter("character_id").unwrap();
    assert!(doc.node(global.node).schema().is_global);

    let op = doc.operation("get_characters_character_id_wallet_journal").unwrap();
    let path_param = op.parameter("character_id").unwrap();
    assert_eq!(path_param.node, global.node);

    let entry = doc.definition("wallet_journal_entry").unwrap();
    let items = doc.node(op.response(200).unwrap()).items().unwrap();
    assert_eq!(items.id(), entry.id());
}

#[test]
fn operation_parameters_are_merged_and_ordered() {
    let doc = load();
    let op = doc.operation("get_characters_character_id_wallet_journal").unwrap();
    let names: Vec<&str> = op.ordered_parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["character_id", "If-None-Match", "token", "datasource", "page"]);

    // the operation-level `page` replaced the path-level one
    let page = op.parameter("page").unwrap();
    assert_eq!(doc.node(page.node).schema().minimum, Some(1.0));
    assert_eq!(op.parameter("if_none_match").unwrap().location, ParameterLocation::Header);
}

#[test]
fn operation_metadata() {
    let doc = load();
    let op = doc.operation("get_characters_character_id_wallet_journal").unwrap();
    assert_eq!(op.method, HttpMethod::Get);
    assert_eq!(op.function_name(), "GetCharactersCharacterIdWalletJournal");
    assert_eq!(op.short_description(), Some("Retrieve the given character's wallet journal"));
    assert_eq!(op.scopes, ["esi-wallet.read_character_wallet.v1"]);
    assert_eq!(op.tags, ["Wallet"]);
    // `304` has no schema and `default` is not a status code
    let statuses: Vec<u16> = op.ordered_responses().map(|(status, _)| status).collect();
    assert_eq!(statuses, [200]);

    let gets: Vec<&str> = doc
        .operations_by_method(HttpMethod::Get)
        .map(|op| op.operation_id.as_str())
        .collect();
    assert_eq!(gets, ["get_characters_character_id_wallet_journal", "get_status"]);
    assert_eq!(doc.operations_by_method(HttpMethod::Post).count(), 0);
}

#[test]
fn response_body_decodes_through_shared_definition() {
    let doc = load();
    let op = doc.operation("get_characters_character_id_wallet_journal").unwrap();
    let schema = doc.node(op.response(200).unwrap());
    let native = schema
        .wire_to_native(&json!([{"id": 1, "date": "2018-01-01T00:00:00Z", "extra": true}]))
        .unwrap();
    let entries = native.as_array().unwrap();
    let entry = entries[0].as_object().unwrap();
    assert!(matches!(entry["date"], NativeValue::DateTime(_)));
    assert!(!entry.contains_key("extra"));
}

#[test]
fn yaml_documents_load() {
    let yaml = r#"
swagger: "2.0"
basePath: /dev
paths:
  /alliances/:
    get:
      operationId: get_alliances
      responses:
        "200":
          description: ok
          schema:
            type: array
            uniqueItems: true
            items:
              type: integer
              format: int32
"#;
    let doc = SpecDocument::parse(yaml, &LoadOptions::default()).unwrap();
    let op = doc.operation("get_alliances").unwrap();
    let schema = doc.node(op.response(200).unwrap());
    assert_eq!(schema.kind(), SchemaKind::Array);
    assert!(schema.schema().unique_items);
}

#[test]
fn missing_operation_id_is_an_error() {
    let raw = json!({"swagger": "2.0", "paths": {"/status/": {"get": {"responses": {}}}}});
    let err = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecError::MissingOperationId { .. }));
    assert_eq!(err.to_string(), "operation `GET /status/` has no operationId");
}

#[test]
fn dangling_ref_is_an_error() {
    let raw = json!({
        "swagger": "2.0",
        "paths": {"/x/": {"get": {"operationId": "get_x", "parameters": [{"$ref": "#/parameters/nope"}], "responses": {}}}}
    });
    let err = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecError::Ref(RefError::NotFound(_))));
}

#[test]
fn recursive_definitions_load() {
    let raw = json!({
        "swagger": "2.0",
        "definitions": {
            "category": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "children": {"type": "array", "items": {"$ref": "#/definitions/category"}}
                }
            }
        },
        "paths": {}
    });
    let doc = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap();
    let category = doc.definition("category").unwrap();
    let child = category.property("children").unwrap().items().unwrap();
    assert_eq!(child.id(), category.id());

    let native = category
        .wire_to_native(&json!({"name": "a", "children": [{"name": "b", "children": []}]}))
        .unwrap();
    category.validate(&native).unwrap();
}

#[test]
fn schema_cycle_through_alias_is_rejected() {
    let raw = json!({
        "swagger": "2.0",
        "definitions": {
            "a": {"$ref": "#/definitions/b"},
            "b": {"schema": {"$ref": "#/definitions/a"}}
        },
        "paths": {}
    });
    let err = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecError::Ref(RefError::Cycle(_))));
}

#[test]
fn duplicate_operation_id_is_an_error() {
    let raw = json!({
        "swagger": "2.0",
        "paths": {
            "/status/": {"get": {"operationId": "get_status", "responses": {}}},
            "/status/legacy/": {"get": {"operationId": "get_status", "responses": {}}}
        }
    });
    let err = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecError::InvalidSpec(_)));
    assert!(err.to_string().contains("duplicate operationId `get_status`"));
}

#[test]
fn percent_escaped_refs_share_the_definition_node() {
    let raw = json!({
        "swagger": "2.0",
        "definitions": {"ship type": {"type": "integer", "format": "int32"}},
        "paths": {
            "/ships/": {
                "get": {
                    "operationId": "get_ships",
                    "responses": {
                        "200": {"description": "ok", "schema": {"$ref": "#/definitions/ship%20type"}}
                    }
                }
            }
        }
    });
    let doc = SpecDocument::from_json(&raw, &LoadOptions::default()).unwrap();
    let op = doc.operation("get_ships").unwrap();
    assert_eq!(op.response(200), Some(doc.definition("ship type").unwrap().id()));
}
