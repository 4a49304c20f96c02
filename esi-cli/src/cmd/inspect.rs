use std::path::Path;

use esi_core::{CallSignature, HttpMethod, ParameterLocation};
use serde::Serialize;

use crate::cmd::load_document;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{LoadArgs, OutputArgs};

#[derive(Serialize)]
struct ParameterInfo {
    name: String,
    location: ParameterLocation,
    required: bool,
    signature: CallSignature,
    doc: String,
}

#[derive(Serialize)]
struct ResponseInfo {
    status: u16,
    native_type: String,
}

#[derive(Serialize)]
struct InspectResult {
    operation_id: String,
    function_name: String,
    method: HttpMethod,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    tags: Vec<String>,
    scopes: Vec<String>,
    parameters: Vec<ParameterInfo>,
    responses: Vec<ResponseInfo>,
}

pub fn inspect_cmd(path: &Path, operation_id: &str, load: &LoadArgs, output: OutputArgs) -> i32 {
    let loaded = match load_document(path, load, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let doc = &loaded.doc;
    let Some(op) = doc.operation(operation_id) else {
        print_error(
            output.format,
            output.quiet,
            &format!("operation '{operation_id}' not found"),
        );
        return exit_codes::CALL_REFUSED;
    };

    let result = InspectResult {
        operation_id: op.operation_id.clone(),
        function_name: op.function_name(),
        method: op.method,
        path: op.path.clone(),
        summary: op.summary.clone(),
        description: op.short_description().map(str::to_string),
        tags: op.tags.clone(),
        scopes: op.scopes.clone(),
        parameters: op
            .ordered_parameters()
            .iter()
            .map(|p| ParameterInfo {
                name: p.name.clone(),
                location: p.location,
                required: p.required,
                signature: p.call_signature(doc.graph()),
                doc: p.description_line(),
            })
            .collect(),
        responses: op
            .ordered_responses()
            .map(|(status, node)| ResponseInfo {
                status,
                native_type: doc.node(node).inferred_type().to_string(),
            })
            .collect(),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("{} {} ({})", result.method, result.path, result.function_name);
        if let Some(d) = &result.description {
            println!("  {d}");
        }
        if !result.scopes.is_empty() {
            println!("  scopes: {}", result.scopes.join(", "));
        }
        println!("  parameters:");
        for p in &result.parameters {
            println!(
                "    - {} ({}, {}): {}",
                p.signature.name, p.location, p.signature.native_type, p.doc
            );
        }
        println!("  responses:");
        for r in &result.responses {
            println!("    - {}: {}", r.status, r.native_type);
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
