//! One `path × method` endpoint of a loaded document.

mod parameter;

use std::collections::BTreeMap;
use std::fmt;

use crate::naming::to_pascal_case;
use crate::schema::NodeId;

pub use parameter::{CallSignature, Parameter, ParameterLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// Case-insensitive; anything else under a path item (`parameters`, `x-*`) is not a method.
    pub fn parse(key: &str) -> Option<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(key))
    }

    /// Lowercase, as used for path item keys.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Operation {
    pub operation_id: String,
    pub method: HttpMethod,
    /// URL template with `{name}` placeholders for path parameters.
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Empty when the operation needs no scope.
    pub scopes: Vec<String>,
    /// Kept in presentation order.
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<u16, NodeId>,
}

impl Operation {
    pub fn ordered_parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn ordered_responses(&self) -> impl Iterator<Item = (u16, NodeId)> + '_ {
        self.responses.iter().map(|(status, id)| (*status, *id))
    }

    pub fn response(&self, status: u16) -> Option<NodeId> {
        self.responses.get(&status).copied()
    }

    /// Looks a parameter up by call-argument name.
    pub fn parameter(&self, safe_name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.safe_name == safe_name)
    }

    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.location == location)
    }

    /// No declared scope always passes; otherwise every declared scope must be enabled, and a
    /// missing enabled set fails.
    pub fn validate_scopes(&self, enabled: Option<&[String]>) -> bool {
        if self.scopes.is_empty() {
            return true;
        }
        match enabled {
            Some(enabled) => self.scopes.iter().all(|s| enabled.contains(s)),
            None => false,
        }
    }

    pub fn missing_scopes(&self, enabled: Option<&[String]>) -> Vec<String> {
        let enabled = enabled.unwrap_or(&[]);
        self.scopes
            .iter()
            .filter(|s| !enabled.contains(s))
            .cloned()
            .collect()
    }

    pub fn function_name(&self) -> String {
        to_pascal_case(&self.operation_id, true)
    }

    /// Description with the trailing `---` block (alternate routes, cache notes) removed.
    pub fn short_description(&self) -> Option<&str> {
        let desc = self.description.as_deref()?;
        let head = desc.split("\n---").next().unwrap_or(desc).trim();
        (!head.is_empty()).then_some(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(scopes: &[&str]) -> Operation {
        Operation {
            operation_id: "get_characters_character_id_wallet".to_string(),
            method: HttpMethod::Get,
            path: "/characters/{character_id}/wallet/".to_string(),
            summary: None,
            description: Some("Returns a character's wallet balance\n\n---\nAlternate route: `/v1/`".to_string()),
            tags: vec!["Wallet".to_string()],
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            parameters: Vec::new(),
            responses: BTreeMap::new(),
        }
    }

    fn owned(scopes: &[&str]) -> Vec<String> {
        scopes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scope_gate() {
        assert!(operation(&[]).validate_scopes(None));
        assert!(operation(&[]).validate_scopes(Some(&owned(&["X"]))));
        assert!(!operation(&["A"]).validate_scopes(None));
        assert!(operation(&["A", "B"]).validate_scopes(Some(&owned(&["A", "B", "C"]))));
        assert!(!operation(&["A", "B"]).validate_scopes(Some(&owned(&["A"]))));
        assert_eq!(operation(&["A", "B"]).missing_scopes(Some(&owned(&["A"]))), ["B"]);
    }

    #[test]
    fn metadata() {
        let op = operation(&[]);
        assert_eq!(op.function_name(), "GetCharactersCharacterIdWallet");
        assert_eq!(op.short_description(), Some("Returns a character's wallet balance"));
    }

    #[test]
    fn method_keys() {
        assert_eq!(HttpMethod::parse("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("parameters"), None);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
