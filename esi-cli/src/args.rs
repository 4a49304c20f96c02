use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct LoadArgs {
    /// A second document merged into the first; the first wins on conflicts.
    #[arg(long, value_name = "PATH")]
    pub meta: Option<PathBuf>,
    #[arg(long, default_value_t = esi_core::spec::DEFAULT_MAX_REF_DEPTH)]
    pub max_ref_depth: usize,
}

#[derive(Debug, Args, Clone)]
pub struct AuthArgs {
    /// Access token sent as a bearer token.
    #[arg(long)]
    pub token: Option<String>,
    /// A scope granted to the token; repeatable.
    #[arg(long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,
}
