//! Identifier helpers for turning wire names into call-argument and function names.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// `X-User-Agent` → `x_user_agent`, `characterID` → `character_id`.
pub fn to_snake_case(name: &str) -> String {
    let name = name.replace(['-', ' '], "_");
    let name = FIRST_CAPS.replace_all(&name, "${1}_${2}");
    let name = ALL_CAPS.replace_all(&name, "${1}_${2}").to_lowercase();
    name.replace("__", "_")
}

/// `character_id` → `characterId`.
pub fn to_camel_case(name: &str) -> String {
    let name = name.replace(['-', ' '], "_");
    let mut parts = name.split('_');
    let mut out = parts.next().unwrap_or_default().to_lowercase();
    for part in parts {
        out.push_str(&title_case(part));
    }
    out
}

/// `get_characters_character_id` → `GetCharactersCharacterId`.
///
/// With `allow_double_under`, a `__` in the input survives as a single `_` in the output.
pub fn to_pascal_case(name: &str, allow_double_under: bool) -> String {
    let mut name = name.replace('_', "-");
    if allow_double_under {
        name = name.replace("--", "_-");
    }
    name.replace(' ', "-").split('-').map(title_case).collect()
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_is_alpha = false;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_from_header_and_camel_names() {
        assert_eq!(to_snake_case("X-User-Agent"), "x_user_agent");
        assert_eq!(to_snake_case("If-None-Match"), "if_none_match");
        assert_eq!(to_snake_case("characterID"), "character_id");
        assert_eq!(to_snake_case("character_id"), "character_id");
        assert_eq!(to_snake_case("datasource"), "datasource");
    }

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("character_id"), "characterId");
        assert_eq!(to_camel_case("Accept-Language"), "acceptLanguage");
    }

    #[test]
    fn pascal_case_keeps_double_underscore() {
        assert_eq!(
            to_pascal_case("get_characters_character_id", false),
            "GetCharactersCharacterId"
        );
        assert_eq!(to_pascal_case("get_status__v2", true), "GetStatus_V2");
    }
}
