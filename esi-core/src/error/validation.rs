use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

/// Key under which a composite value's own errors are stored once it also has field errors.
pub const SELF_KEY: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    TypeError,
    Value,
    Required,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TypeError => "typeerror",
            ErrorCode::Value => "value",
            ErrorCode::Required => "required",
            ErrorCode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failure: a message template with `{name}` placeholders, a machine code and the
/// values substituted into the template.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorLeaf {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, JsonValue>,
}

impl ErrorLeaf {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The message with every `{name}` placeholder substituted.
    pub fn rendered(&self) -> String {
        let mut out = self.message.clone();
        for (name, value) in &self.params {
            let text = match value {
                JsonValue::Null => "none".to_string(),
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            out = out.replace(&format!("{{{name}}}"), &text);
        }
        out
    }
}

/// Tree of validation failures.
///
/// A scalar check produces `Leaves`; composite values key their children's errors by field
/// name (objects) or `[index]` (arrays) in `Fields`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ValidationError {
    Leaves(Vec<ErrorLeaf>),
    Fields(BTreeMap<String, ValidationError>),
}

impl ValidationError {
    pub fn leaf(leaf: ErrorLeaf) -> Self {
        ValidationError::Leaves(vec![leaf])
    }

    pub fn nested(key: impl Into<String>, inner: ValidationError) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(key.into(), inner);
        ValidationError::Fields(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of leaf errors in the whole tree.
    pub fn len(&self) -> usize {
        match self {
            ValidationError::Leaves(leaves) => leaves.len(),
            ValidationError::Fields(fields) => fields.values().map(Self::len).sum(),
        }
    }

    /// Combines two trees. Leaves meeting fields are kept under [`SELF_KEY`].
    pub fn merge(self, other: ValidationError) -> ValidationError {
        match (self, other) {
            (ValidationError::Leaves(mut a), ValidationError::Leaves(b)) => {
                a.extend(b);
                ValidationError::Leaves(a)
            }
            (ValidationError::Fields(mut a), ValidationError::Fields(b)) => {
                for (key, inner) in b {
                    merge_into(&mut a, key, inner);
                }
                ValidationError::Fields(a)
            }
            (ValidationError::Fields(mut fields), leaves @ ValidationError::Leaves(_))
            | (leaves @ ValidationError::Leaves(_), ValidationError::Fields(mut fields)) => {
                merge_into(&mut fields, SELF_KEY.to_string(), leaves);
                ValidationError::Fields(fields)
            }
        }
    }

    /// Every leaf with its dotted path (`character.skills[3]`); the empty path is the root.
    pub fn flatten(&self) -> Vec<(String, &ErrorLeaf)> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a ErrorLeaf)>) {
        match self {
            ValidationError::Leaves(leaves) => {
                out.extend(leaves.iter().map(|leaf| (prefix.clone(), leaf)));
            }
            ValidationError::Fields(fields) => {
                for (key, inner) in fields {
                    inner.flatten_into(join_path(&prefix, key), out);
                }
            }
        }
    }

    /// Rendered messages, each prefixed with its path when it has one.
    pub fn messages(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .map(|(path, leaf)| {
                if path.is_empty() {
                    leaf.rendered()
                } else {
                    format!("{path}: {}", leaf.rendered())
                }
            })
            .collect()
    }
}

fn merge_into(fields: &mut BTreeMap<String, ValidationError>, key: String, inner: ValidationError) {
    match fields.remove(&key) {
        Some(existing) => {
            fields.insert(key, existing.merge(inner));
        }
        None => {
            fields.insert(key, inner);
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if key.is_empty() {
        prefix.to_string()
    } else if prefix.is_empty() {
        key.to_string()
    } else if key.starts_with('[') {
        format!("{prefix}{key}")
    } else {
        format!("{prefix}.{key}")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed ({} errors)", self.len())?;
        for message in self.messages() {
            write!(f, "; {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collects errors for one composite value while its children are being checked.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Option<ValidationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, leaf: ErrorLeaf) {
        self.add(ValidationError::leaf(leaf));
    }

    pub fn nest(&mut self, key: impl Into<String>, inner: ValidationError) {
        self.add(ValidationError::nested(key, inner));
    }

    pub fn add(&mut self, err: ValidationError) {
        self.errors = Some(match self.errors.take() {
            Some(existing) => existing.merge(err),
            None => err,
        });
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        match self.errors {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> ErrorLeaf {
        ErrorLeaf::new("Value is required", ErrorCode::Required)
    }

    #[test]
    fn renders_params_into_message() {
        let leaf = ErrorLeaf::new("Value not within allowed range: {min} - {max}", ErrorCode::Value)
            .with_param("min", 1)
            .with_param("max", JsonValue::Null);
        assert_eq!(leaf.rendered(), "Value not within allowed range: 1 - none");
    }

    #[test]
    fn merge_keeps_leaves_beside_fields() {
        let merged = ValidationError::leaf(required())
            .merge(ValidationError::nested("[0]", ValidationError::leaf(required())));
        assert_eq!(merged.len(), 2);
        let paths: Vec<String> = merged.flatten().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["".to_string(), "[0]".to_string()]);
    }

    #[test]
    fn flatten_joins_nested_paths() {
        let inner = ValidationError::nested("[2]", ValidationError::leaf(required()));
        let tree = ValidationError::nested("character", ValidationError::nested("skills", inner));
        assert_eq!(tree.messages(), vec!["character.skills[2]: Value is required".to_string()]);
    }

    #[test]
    fn collector_merges_same_field() {
        let mut c = ErrorCollector::new();
        c.nest("name", ValidationError::leaf(required()));
        c.nest("name", ValidationError::leaf(required()));
        let err = c.finish().unwrap_err();
        match err {
            ValidationError::Fields(fields) => assert_eq!(fields["name"].len(), 2),
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
