use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::RefError;

/// Resolves one local `#/...` pointer. `visited` accumulates every pointer followed in the
/// current chain so a chain that comes back on itself is reported instead of looping.
///
/// The fragment may be percent-encoded (`#/definitions/a%20b`); it is decoded before the
/// RFC 6901 lookup, and `#` alone designates the whole document.
pub(crate) fn resolve_ref<'a>(
    doc: &'a JsonValue,
    ref_str: &str,
    visited: &mut HashSet<String>,
) -> Result<&'a JsonValue, RefError> {
    let Some(fragment) = ref_str.strip_prefix('#') else {
        return Err(RefError::External(ref_str.to_string()));
    };
    let pointer = urlencoding::decode(fragment)
        .map_err(|_| RefError::NotFound(ref_str.to_string()))?;
    if !visited.insert(pointer.to_string()) {
        return Err(RefError::Cycle(ref_str.to_string()));
    }

    doc.pointer(&pointer)
        .ok_or_else(|| RefError::NotFound(ref_str.to_string()))
}

/// `#/<section>/<name>` with `name` escaped per RFC 6901, in [`canonical_ref`] form.
pub(crate) fn local_pointer(section: &str, name: &str) -> String {
    let escaped = name.replace('~', "~0").replace('/', "~1").replace('%', "%25");
    format!("#/{section}/{escaped}")
}

/// The memo key for a `$ref`: percent escapes decoded, with only `%` itself kept escaped.
pub(crate) fn canonical_ref(ref_str: &str) -> String {
    match urlencoding::decode(ref_str) {
        Ok(decoded) => decoded.replace('%', "%25"),
        Err(_) => ref_str.to_string(),
    }
}

pub(crate) fn is_global_pointer(pointer: &str) -> bool {
    pointer.starts_with("#/definitions/") || pointer.starts_with("#/parameters/")
}
