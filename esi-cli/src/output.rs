use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = rendered {
        println!("{json}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

/// Validation failures as `path: message` lines, or one structured object in JSON mode.
pub fn print_validation_error(format: OutputFormat, quiet: bool, err: &esi_core::ValidationError) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            eprintln!("error: invalid arguments");
            for line in err.messages() {
                eprintln!("- {line}");
            }
        }
        OutputFormat::Json => {
            let out = serde_json::json!({"error": "invalid arguments", "details": err});
            eprintln!("{}", serde_json::to_string(&out).unwrap_or_default());
        }
    }
}
