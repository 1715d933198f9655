use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export the tickets OpenAPI document.
    Openapi(OpenapiArgs),
    /// Print a registered JSON Schema, or list registered names.
    Schema(SchemaArgs),
    /// Validate a JSON payload against a registered schema.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct OpenapiArgs {
    /// Output path (overrides `openapi.output` from config).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `CreateTicketRequest`. Omit to list every name.
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Schema name to validate against.
    pub name: String,

    /// JSON file to read; stdin when omitted.
    pub file: Option<PathBuf>,
}
