use std::path::Path;

use esi_core::HttpMethod;
use serde::Serialize;

use crate::cmd::load_document;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{LoadArgs, OutputArgs};

#[derive(Serialize)]
struct OperationInfo {
    operation_id: String,
    method: HttpMethod,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    tags: Vec<String>,
    scopes: Vec<String>,
}

#[derive(Serialize)]
struct OperationsResult {
    operations: Vec<OperationInfo>,
}

pub fn operations_cmd(
    path: &Path,
    method: Option<&str>,
    tag: Option<&str>,
    load: &LoadArgs,
    output: OutputArgs,
) -> i32 {
    let method = match method.map(|m| (m, HttpMethod::parse(m))) {
        None => None,
        Some((_, Some(m))) => Some(m),
        Some((raw, None)) => {
            print_error(output.format, output.quiet, &format!("unknown HTTP method `{raw}`"));
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let loaded = match load_document(path, load, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let doc = &loaded.doc;

    let selected: Box<dyn Iterator<Item = &esi_core::Operation>> = match method {
        Some(m) => Box::new(doc.operations_by_method(m)),
        None => Box::new(doc.operations()),
    };
    let operations: Vec<OperationInfo> = selected
        .filter(|op| tag.map_or(true, |t| op.tags.iter().any(|have| have.eq_ignore_ascii_case(t))))
        .map(|op| OperationInfo {
            operation_id: op.operation_id.clone(),
            method: op.method,
            path: op.path.clone(),
            summary: op.summary.clone(),
            tags: op.tags.clone(),
            scopes: op.scopes.clone(),
        })
        .collect();
    let result = OperationsResult { operations };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Operations in {}:", path.display());
        for op in &result.operations {
            println!("  - {} {} {}", op.method, op.path, op.operation_id);
            if let Some(s) = &op.summary {
                println!("    {s}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
