use esi_core::{meta_spec_url, spec_url};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct SpecUrlResult {
    url: String,
}

pub fn spec_url_cmd(name: Option<&str>, output: OutputArgs) -> i32 {
    let url = match name {
        Some(name) => spec_url(name),
        None => meta_spec_url(),
    };
    match url {
        Ok(url) => {
            if output.format == OutputFormat::Text && !output.quiet {
                println!("{url}");
            } else {
                print_result(output.format, output.quiet, &SpecUrlResult { url: url.to_string() });
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::VALIDATION_FAILED
        }
    }
}
