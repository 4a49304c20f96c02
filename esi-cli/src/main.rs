use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "esi", version, about = "Swagger 2.0 document inspector and call preparer")]
struct Cli {
    /// More log output on stderr (`-v` debug, `-vv` trace); `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    std::process::exit(run_command(cli.command));
}

fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate { path, load, output } => cmd::validate::validate_cmd(&path, &load, output),
        Command::Operations {
            path,
            method,
            tag,
            load,
            output,
        } => cmd::operations::operations_cmd(&path, method.as_deref(), tag.as_deref(), &load, output),
        Command::Inspect {
            path,
            operation,
            load,
            output,
        } => cmd::inspect::inspect_cmd(&path, &operation, &load, output),
        Command::Prepare {
            path,
            operation,
            args,
            auth,
            skip_validation,
            ignore_scopes,
            load,
            output,
        } => cmd::prepare::prepare_cmd(
            &path,
            &operation,
            &args,
            auth,
            skip_validation,
            ignore_scopes,
            &load,
            output,
        ),
        Command::SpecUrl { name, output } => cmd::spec_url::spec_url_cmd(name.as_deref(), output),
    }
}
