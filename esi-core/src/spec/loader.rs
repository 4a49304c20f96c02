use std::collections::{BTreeMap, HashMap};

use serde_json::Value as JsonValue;
use tracing::{debug, trace, warn};

use crate::error::SpecError;
use crate::operation::{HttpMethod, Operation, Parameter, ParameterLocation};
use crate::schema::{GraphBuilder, NodeId, SchemaGraph};
use crate::spec::refs::local_pointer;
use crate::spec::{LoadOptions, SpecDocument, SpecInfo};

const DEFAULT_TITLE: &str = "EVE Swagger Interface";

pub(crate) fn load(raw: &JsonValue, options: &LoadOptions) -> Result<SpecDocument, SpecError> {
    if !raw.is_object() {
        return Err(SpecError::InvalidSpec("document root must be an object".to_string()));
    }
    match raw.get("swagger").and_then(JsonValue::as_str) {
        Some(v) if v.starts_with("2.") => {}
        Some(v) => warn!(version = v, "unexpected swagger version; loading anyway"),
        None => warn!("document has no `swagger` version field"),
    }

    let mut graph = SchemaGraph::new();
    let mut loader = Loader {
        builder: GraphBuilder::new(raw, &mut graph, options.max_ref_depth),
        global_params: HashMap::new(),
    };

    // Globals first, so every later `$ref` lands on the node built here.
    let mut definitions = BTreeMap::new();
    for name in section_keys(raw, "definitions") {
        let id = loader.builder.build_pointer(&local_pointer("definitions", name))?;
        definitions.insert(name.to_string(), id);
    }

    let mut parameters = BTreeMap::new();
    for name in section_keys(raw, "parameters") {
        let pointer = local_pointer("parameters", name);
        let id = loader.builder.build_pointer(&pointer)?;
        let (fragment, _) = loader.builder.follow(&raw["parameters"][name])?;
        let param = Parameter::from_fragment(fragment, id, &pointer)?;
        loader.global_params.insert(pointer, param.clone());
        parameters.insert(name.to_string(), param);
    }

    let mut operations = Vec::new();
    if let Some(paths) = raw.get("paths").and_then(JsonValue::as_object) {
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            let shared = item.get("parameters");
            for (key, op) in item {
                let Some(method) = HttpMethod::parse(key) else {
                    if key != "parameters" {
                        trace!(path = %path, key = %key, "skipping non-method path item key");
                    }
                    continue;
                };
                operations.push(loader.operation(path, method, op, shared)?);
            }
        }
    }
    drop(loader);

    let mut doc = SpecDocument {
        info: read_info(raw),
        graph,
        definitions,
        parameters,
        operations: BTreeMap::new(),
        by_method: BTreeMap::new(),
    };
    for op in operations {
        if doc.operations.contains_key(&op.operation_id) {
            return Err(SpecError::InvalidSpec(format!(
                "duplicate operationId `{}`",
                op.operation_id
            )));
        }
        doc.index_operation(op);
    }

    debug!(
        definitions = doc.definitions.len(),
        parameters = doc.parameters.len(),
        operations = doc.operations.len(),
        nodes = doc.graph.len(),
        "loaded spec document"
    );
    Ok(doc)
}

struct Loader<'d, 'g> {
    builder: GraphBuilder<'d, 'g>,
    /// Global parameters keyed by their `#/parameters/...` pointer.
    global_params: HashMap<String, Parameter>,
}

impl<'d, 'g> Loader<'d, 'g> {
    fn operation(
        &mut self,
        path: &str,
        method: HttpMethod,
        op: &'d JsonValue,
        shared: Option<&'d JsonValue>,
    ) -> Result<Operation, SpecError> {
        let operation_id = op
            .get("operationId")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| SpecError::MissingOperationId {
                method: method.to_string(),
                path: path.to_string(),
            })?;
        let context = format!("{method} {path}");

        // Operation-level parameters replace path-level ones with the same name and location.
        let mut merged: BTreeMap<(ParameterLocation, String), Parameter> = BTreeMap::new();
        for list in [shared, op.get("parameters")].into_iter().flatten() {
            for raw in list.as_array().into_iter().flatten() {
                let param = self.parameter(raw, &context)?;
                merged.insert((param.location, param.name.clone()), param);
            }
        }
        let mut parameters: Vec<Parameter> = merged.into_values().collect();
        parameters.sort_by(Parameter::presentation_order);

        Ok(Operation {
            operation_id: operation_id.to_string(),
            method,
            path: path.to_string(),
            summary: str_field(op, "summary"),
            description: str_field(op, "description"),
            tags: string_list(op.get("tags")),
            scopes: scopes(op),
            parameters,
            responses: self.responses(op, &context)?,
        })
    }

    fn parameter(&mut self, raw: &'d JsonValue, context: &str) -> Result<Parameter, SpecError> {
        let (fragment, pointer) = self.builder.follow(raw)?;
        if let Some(global) = pointer.as_ref().and_then(|p| self.global_params.get(p)) {
            return Ok(global.clone());
        }
        let node = self.builder.build(raw)?;
        Parameter::from_fragment(fragment, node, context)
    }

    /// Only responses declaring a schema are kept; their bodies are decoded through it.
    fn responses(&mut self, op: &'d JsonValue, context: &str) -> Result<BTreeMap<u16, NodeId>, SpecError> {
        let mut out = BTreeMap::new();
        let Some(responses) = op.get("responses").and_then(JsonValue::as_object) else {
            return Ok(out);
        };
        for (code, raw) in responses {
            let Ok(status) = code.parse::<u16>() else {
                trace!(context, code = %code, "skipping non-numeric response code");
                continue;
            };
            let (response, _) = self.builder.follow(raw)?;
            if let Some(schema) = response.get("schema") {
                out.insert(status, self.builder.build(schema)?);
            }
        }
        Ok(out)
    }
}

fn section_keys<'a>(raw: &'a JsonValue, section: &str) -> Vec<&'a str> {
    raw.get(section)
        .and_then(JsonValue::as_object)
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn str_field(v: &JsonValue, key: &str) -> Option<String> {
    v.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn string_list(v: Option<&JsonValue>) -> Vec<String> {
    v.and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Every scope listed by the first security requirement.
fn scopes(op: &JsonValue) -> Vec<String> {
    op.get("security")
        .and_then(JsonValue::as_array)
        .and_then(|reqs| reqs.first())
        .and_then(JsonValue::as_object)
        .map(|req| req.values().flat_map(|v| string_list(Some(v))).collect())
        .unwrap_or_default()
}

fn read_info(raw: &JsonValue) -> SpecInfo {
    let info = raw.get("info");
    let schemes = string_list(raw.get("schemes"));
    SpecInfo {
        host: str_field(raw, "host"),
        base_path: str_field(raw, "basePath").unwrap_or_else(|| "/".to_string()),
        schemes: if schemes.is_empty() {
            vec!["https".to_string()]
        } else {
            schemes
        },
        title: info
            .and_then(|i| str_field(i, "title"))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: info.and_then(|i| str_field(i, "description")),
        version: info.and_then(|i| str_field(i, "version")),
        sso_scopes: raw
            .pointer("/securityDefinitions/evesso/scopes")
            .and_then(JsonValue::as_object)
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}
