use std::path::Path;

use esi_core::{NativeValue, SpecDocument};
use esi_exec::{prepare_call, CallArgs, CallError, CallOptions, ClientConfig};
use serde_json::Value as JsonValue;

use crate::cmd::load_document;
use crate::exit_codes;
use crate::output::{print_error, print_result, print_validation_error, OutputFormat};
use crate::{AuthArgs, LoadArgs, OutputArgs};

#[allow(clippy::too_many_arguments)]
pub fn prepare_cmd(
    path: &Path,
    operation_id: &str,
    raw_args: &[String],
    auth: AuthArgs,
    skip_validation: bool,
    ignore_scopes: bool,
    load: &LoadArgs,
    output: OutputArgs,
) -> i32 {
    let loaded = match load_document(path, load, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let doc = &loaded.doc;

    let args = match parse_args(doc, operation_id, raw_args) {
        Ok(a) => a,
        Err(message) => {
            print_error(output.format, output.quiet, &message);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let scopes = (!auth.scopes.is_empty()).then_some(auth.scopes);
    let config = ClientConfig::from_spec(doc, auth.token, scopes);
    let options = CallOptions {
        skip_validation,
        ignore_scopes,
        ..CallOptions::default()
    };

    match prepare_call(doc, &config, operation_id, args, options) {
        Ok(request) => {
            if output.format == OutputFormat::Text && !output.quiet {
                println!("{} {}", request.method, request.url);
                for (name, value) in &request.headers {
                    if name.eq_ignore_ascii_case("authorization") {
                        println!("{name}: Bearer ***");
                    } else {
                        println!("{name}: {value}");
                    }
                }
                if let Some(body) = &request.body {
                    println!();
                    println!("{}", serde_json::to_string_pretty(body).unwrap_or_default());
                }
            } else {
                print_result(output.format, output.quiet, &request);
            }
            exit_codes::SUCCESS
        }
        Err(CallError::Validation(err)) => {
            print_validation_error(output.format, output.quiet, &err);
            exit_codes::VALIDATION_FAILED
        }
        Err(e @ (CallError::ScopeRequired(_) | CallError::UnknownOperation(_))) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::CALL_REFUSED
        }
        Err(e @ (CallError::Url(_) | CallError::Response(_))) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::RUNTIME_ERROR
        }
        Err(e @ (CallError::Conversion(_) | CallError::MissingPathParameter(_))) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::VALIDATION_FAILED
        }
    }
}

/// `NAME=JSON` pairs; values that are not JSON are taken as strings. Known parameters are
/// decoded through their schema, so dates and byte strings arrive as native values.
fn parse_args(doc: &SpecDocument, operation_id: &str, raw_args: &[String]) -> Result<CallArgs, String> {
    let op = doc.operation(operation_id);
    let mut args = CallArgs::new();
    for raw in raw_args {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("invalid --arg `{raw}`, expected NAME=JSON"))?;
        let wire = serde_json::from_str::<JsonValue>(value)
            .unwrap_or_else(|_| JsonValue::String(value.to_string()));
        let native = match op.and_then(|op| op.parameter(name)) {
            Some(param) => doc
                .node(param.node)
                .wire_to_native(&wire)
                .map_err(|e| format!("argument `{name}`: {e}"))?,
            None => NativeValue::from(wire),
        };
        args.insert(name.to_string(), native);
    }
    Ok(args)
}
