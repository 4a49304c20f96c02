use std::cmp::Ordering;
use std::fmt;

use serde_json::Value as JsonValue;

use crate::error::SpecError;
use crate::naming::to_snake_case;
use crate::schema::{NodeId, SchemaGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Body,
    ];

    pub fn parse(s: &str) -> Option<ParameterLocation> {
        match s {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema node placed at a wire location under a wire name.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Parameter {
    /// Wire name.
    pub name: String,
    /// Identifier-safe call-argument name.
    pub safe_name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub default: Option<JsonValue>,
    pub description: Option<String>,
    pub node: NodeId,
}

/// What a generated call interface needs to declare one argument.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CallSignature {
    pub name: String,
    pub native_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    pub optional: bool,
}

impl Parameter {
    /// Reads name and location from a resolved parameter fragment whose schema is `node`.
    pub(crate) fn from_fragment(
        fragment: &JsonValue,
        node: NodeId,
        context: &str,
    ) -> Result<Parameter, SpecError> {
        let invalid = |message: String| SpecError::InvalidParameter {
            context: context.to_string(),
            message,
        };
        let name = fragment
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| invalid("missing `name`".to_string()))?;
        let raw_location = fragment
            .get("in")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| invalid(format!("`{name}` has no `in`")))?;
        let location = ParameterLocation::parse(raw_location)
            .ok_or_else(|| invalid(format!("`{name}` has unsupported location `{raw_location}`")))?;

        let required = location == ParameterLocation::Path
            || fragment
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);

        Ok(Parameter {
            name: name.to_string(),
            safe_name: to_snake_case(name),
            location,
            required,
            default: fragment.get("default").filter(|d| !d.is_null()).cloned(),
            description: fragment
                .get("description")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            node,
        })
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Without default first, then required first, then by wire name.
    pub fn presentation_order(&self, other: &Parameter) -> Ordering {
        (self.has_default(), !self.required, &self.name).cmp(&(
            other.has_default(),
            !other.required,
            &other.name,
        ))
    }

    pub fn call_signature(&self, graph: &SchemaGraph) -> CallSignature {
        CallSignature {
            name: self.safe_name.clone(),
            native_type: graph.node(self.node).inferred_type().to_string(),
            default: self.default.clone(),
            optional: !self.required || self.has_default(),
        }
    }

    /// `name: description [required]` or `name: description [default: value]`.
    pub fn description_line(&self) -> String {
        let mut line = self.safe_name.clone();
        line.push(':');
        if let Some(desc) = self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            line.push(' ');
            line.push_str(desc);
        }
        if let Some(default) = &self.default {
            let shown = match default {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            line.push_str(&format!(" [default: {shown}]"));
        } else if self.required {
            line.push_str(" [required]");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn param(fragment: JsonValue) -> Parameter {
        Parameter::from_fragment(&fragment, SchemaGraph::new().insert(Default::default()), "test").unwrap()
    }

    #[test]
    fn path_parameters_are_always_required() {
        let p = param(json!({"name": "character_id", "in": "path"}));
        assert!(p.required);
        assert_eq!(p.location, ParameterLocation::Path);
    }

    #[test]
    fn header_names_become_safe_identifiers() {
        let p = param(json!({"name": "If-None-Match", "in": "header"}));
        assert_eq!(p.safe_name, "if_none_match");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let err = Parameter::from_fragment(
            &json!({"name": "file", "in": "formData"}),
            SchemaGraph::new().insert(Default::default()),
            "post /upload",
        )
        .unwrap_err();
        assert!(err.to_string().contains("formData"));
    }

    #[test]
    fn presentation_order() {
        let mut params = vec![
            param(json!({"name": "datasource", "in": "query", "default": "tranquility"})),
            param(json!({"name": "page", "in": "query"})),
            param(json!({"name": "token", "in": "query"})),
            param(json!({"name": "character_id", "in": "path"})),
            param(json!({"name": "alliance_id", "in": "query", "required": true})),
        ];
        params.sort_by(Parameter::presentation_order);
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alliance_id", "character_id", "page", "token", "datasource"]);
    }

    #[test]
    fn description_line_markers() {
        let p = param(json!({"name": "datasource", "in": "query", "default": "tranquility", "description": "The server name"}));
        assert_eq!(p.description_line(), "datasource: The server name [default: tranquility]");
        let p = param(json!({"name": "character_id", "in": "path"}));
        assert_eq!(p.description_line(), "character_id: [required]");
    }
}
