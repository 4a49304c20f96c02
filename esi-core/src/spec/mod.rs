//! Loading a raw document into a [`SpecDocument`].

mod loader;
mod merge;
mod presets;
pub(crate) mod refs;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use crate::error::SpecError;
use crate::operation::{HttpMethod, Operation, Parameter};
use crate::schema::{Node, NodeId, SchemaGraph};

pub use presets::{meta_spec_url, spec_url, SPEC_PRESETS};

pub const DEFAULT_MAX_REF_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub format: DocumentFormat,
    /// Longest `$ref → $ref → …` chain followed before giving up.
    pub max_ref_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
        }
    }
}

/// Parses document text into raw JSON, reporting which format was actually used.
pub fn parse_spec_str(input: &str, format: DocumentFormat) -> Result<(JsonValue, DocumentFormat), SpecError> {
    match format {
        DocumentFormat::Json => Ok((serde_json::from_str(input)?, format)),
        DocumentFormat::Yaml => Ok((serde_yaml::from_str(input)?, format)),
        DocumentFormat::Auto => parse_spec_auto(input),
    }
}

fn parse_spec_auto(input: &str) -> Result<(JsonValue, DocumentFormat), SpecError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(input) {
            Ok(raw) => Ok((raw, DocumentFormat::Json)),
            Err(e) => match serde_yaml::from_str(input) {
                Ok(raw) => Ok((raw, DocumentFormat::Yaml)),
                Err(_) => Err(SpecError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str(input) {
        Ok(raw) => Ok((raw, DocumentFormat::Yaml)),
        Err(e) => match serde_json::from_str(input) {
            Ok(raw) => Ok((raw, DocumentFormat::Json)),
            Err(_) => Err(SpecError::Yaml(e)),
        },
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpecInfo {
    pub host: Option<String>,
    pub base_path: String,
    pub schemes: Vec<String>,
    pub title: String,
    pub description: Option<String>,
    pub version: Option<String>,
    /// `securityDefinitions.evesso.scopes`: scope name to its description.
    pub sso_scopes: BTreeMap<String, String>,
}

impl SpecInfo {
    /// One root URL per scheme; empty without a host.
    pub fn valid_urls(&self) -> Vec<String> {
        let Some(host) = &self.host else {
            return Vec::new();
        };
        self.schemes
            .iter()
            .map(|scheme| format!("{scheme}://{host}{}", self.base_path))
            .collect()
    }
}

/// A loaded document. Read-only once built; share it freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    info: SpecInfo,
    graph: SchemaGraph,
    definitions: BTreeMap<String, NodeId>,
    parameters: BTreeMap<String, Parameter>,
    operations: BTreeMap<String, Operation>,
    by_method: BTreeMap<HttpMethod, BTreeSet<String>>,
}

impl SpecDocument {
    pub fn parse(input: &str, options: &LoadOptions) -> Result<SpecDocument, SpecError> {
        let (raw, _) = parse_spec_str(input, options.format)?;
        Self::from_json(&raw, options)
    }

    pub fn from_json(raw: &JsonValue, options: &LoadOptions) -> Result<SpecDocument, SpecError> {
        loader::load(raw, options)
    }

    pub fn info(&self) -> &SpecInfo {
        &self.info
    }

    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        self.graph.node(id)
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&str, Node<'_>)> {
        self.definitions
            .iter()
            .map(|(name, id)| (name.as_str(), self.graph.node(*id)))
    }

    pub fn definition(&self, name: &str) -> Option<Node<'_>> {
        self.definitions.get(name).map(|id| self.graph.node(*id))
    }

    pub fn global_parameters(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.parameters.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn global_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations.get(operation_id)
    }

    pub fn operations_by_method(&self, method: HttpMethod) -> impl Iterator<Item = &Operation> {
        self.by_method
            .get(&method)
            .into_iter()
            .flatten()
            .filter_map(|id| self.operations.get(id))
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Every scope some operation declares.
    pub fn required_scopes(&self) -> BTreeSet<&str> {
        self.operations
            .values()
            .flat_map(|op| op.scopes.iter().map(String::as_str))
            .collect()
    }

    fn index_operation(&mut self, op: Operation) {
        self.by_method
            .entry(op.method)
            .or_default()
            .insert(op.operation_id.clone());
        self.operations.insert(op.operation_id.clone(), op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_detects_yaml_and_json() {
        let (_, format) = parse_spec_str("{\"swagger\": \"2.0\"}", DocumentFormat::Auto).unwrap();
        assert_eq!(format, DocumentFormat::Json);
        let (raw, format) = parse_spec_str("swagger: '2.0'\nhost: esi.evetech.net\n", DocumentFormat::Auto).unwrap();
        assert_eq!(format, DocumentFormat::Yaml);
        assert_eq!(raw["host"], "esi.evetech.net");
    }

    #[test]
    fn forced_json_reports_json_errors() {
        let err = parse_spec_str("swagger: 2.0", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, SpecError::Json(_)));
    }

    #[test]
    fn valid_urls_per_scheme() {
        let info = SpecInfo {
            host: Some("esi.evetech.net".into()),
            base_path: "/latest".into(),
            schemes: vec!["https".into(), "http".into()],
            title: String::new(),
            description: None,
            version: None,
            sso_scopes: BTreeMap::new(),
        };
        assert_eq!(
            info.valid_urls(),
            ["https://esi.evetech.net/latest", "http://esi.evetech.net/latest"]
        );
    }
}
