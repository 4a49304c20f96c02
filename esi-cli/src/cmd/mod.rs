pub mod inspect;
pub mod operations;
pub mod prepare;
pub mod spec_url;
pub mod validate;

use std::path::Path;

use esi_core::{parse_spec_str, DocumentFormat, LoadOptions, SpecDocument, SpecError};

use crate::exit_codes;
use crate::output::print_error;
use crate::{LoadArgs, OutputArgs};

pub(crate) struct Loaded {
    pub doc: SpecDocument,
    pub format: DocumentFormat,
}

/// Reads and loads `path` (and `--meta`), reporting failures itself; `Err` carries the exit code.
pub(crate) fn load_document(path: &Path, load: &LoadArgs, output: &OutputArgs) -> Result<Loaded, i32> {
    let options = LoadOptions {
        max_ref_depth: load.max_ref_depth,
        ..LoadOptions::default()
    };
    let (doc, format) = load_one(path, &options, output)?;
    let doc = match &load.meta {
        Some(meta) => {
            let (meta_doc, _) = load_one(meta, &options, output)?;
            doc.merge(&meta_doc)
        }
        None => doc,
    };
    Ok(Loaded { doc, format })
}

fn load_one(path: &Path, options: &LoadOptions, output: &OutputArgs) -> Result<(SpecDocument, DocumentFormat), i32> {
    let content = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };

    let loaded = parse_spec_str(&content, options.format)
        .and_then(|(raw, format)| Ok((SpecDocument::from_json(&raw, options)?, format)));
    loaded.map_err(|e| {
        let message = match &e {
            SpecError::Json(inner) => format!("{}: JSON parse failed: {inner}", path.display()),
            SpecError::Yaml(inner) => format!("{}: YAML parse failed: {inner}", path.display()),
            other => format!("{}: {other}", path.display()),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}
