use std::path::Path;

use serde::Serialize;

use crate::cmd::load_document;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{LoadArgs, OutputArgs};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    urls: Vec<String>,
    definitions: usize,
    parameters: usize,
    operations: usize,
    scopes: Vec<String>,
}

pub fn validate_cmd(path: &Path, load: &LoadArgs, output: OutputArgs) -> i32 {
    let loaded = match load_document(path, load, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let doc = &loaded.doc;
    let info = doc.info();

    let result = ValidateResult {
        valid: true,
        format: format!("{:?}", loaded.format),
        title: info.title.clone(),
        version: info.version.clone(),
        urls: info.valid_urls(),
        definitions: doc.definitions().count(),
        parameters: doc.global_parameters().count(),
        operations: doc.operation_count(),
        scopes: doc.required_scopes().into_iter().map(str::to_string).collect(),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!(
            "ok: {} {} ({:?}): {} operations, {} definitions, {} parameters",
            result.title,
            result.version.as_deref().unwrap_or("unversioned"),
            loaded.format,
            result.operations,
            result.definitions,
            result.parameters,
        );
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
