use url::Url;

use crate::error::SpecError;

const ESI_ROOT: &str = "https://esi.evetech.net";

/// Names accepted by [`spec_url`].
pub const SPEC_PRESETS: [&str; 6] = ["legacy", "latest", "dev", "_legacy", "_latest", "_dev"];

/// Where the document for a preset name is published. Unknown names fail before any URL is built.
pub fn spec_url(name: &str) -> Result<Url, SpecError> {
    if !SPEC_PRESETS.contains(&name) {
        return Err(SpecError::InvalidSpec(format!(
            "unknown spec `{name}`, expected one of: {}",
            SPEC_PRESETS.join(", ")
        )));
    }
    parse_url(&format!("{ESI_ROOT}/{name}/swagger.json"))
}

/// The document shared by every version (status and meta routes).
pub fn meta_spec_url() -> Result<Url, SpecError> {
    parse_url(&format!("{ESI_ROOT}/swagger.json"))
}

fn parse_url(raw: &str) -> Result<Url, SpecError> {
    Url::parse(raw).map_err(|e| SpecError::InvalidSpec(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_map_to_urls() {
        assert_eq!(
            spec_url("latest").unwrap().as_str(),
            "https://esi.evetech.net/latest/swagger.json"
        );
        assert_eq!(
            spec_url("_dev").unwrap().as_str(),
            "https://esi.evetech.net/_dev/swagger.json"
        );
        assert_eq!(meta_spec_url().unwrap().path(), "/swagger.json");
    }

    #[test]
    fn unknown_preset_is_invalid() {
        let err = spec_url("v9").unwrap_err();
        assert!(matches!(err, SpecError::InvalidSpec(msg) if msg.contains("v9")));
    }
}
