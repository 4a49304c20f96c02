use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a document and report what it declares.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List operations, optionally filtered.
    Operations {
        path: PathBuf,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show one operation's parameters, scopes and responses.
    Inspect {
        path: PathBuf,
        operation: String,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build the request for a call without sending it.
    Prepare {
        path: PathBuf,
        operation: String,
        #[arg(long = "arg", value_name = "NAME=JSON")]
        args: Vec<String>,
        #[command(flatten)]
        auth: AuthArgs,
        #[arg(long)]
        skip_validation: bool,
        #[arg(long)]
        ignore_scopes: bool,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print where a named document version is published.
    SpecUrl {
        /// One of the preset names; the shared meta document when omitted.
        name: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}
