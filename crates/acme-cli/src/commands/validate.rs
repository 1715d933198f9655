use std::io::Read;
use std::path::Path;

use acme_schema::SchemaRegistry;
use anyhow::{Context, bail};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::output::output;

/// Handle `acme-contracts validate`.
///
/// Prints the safe-parse outcome; a failed validation also exits non-zero.
pub fn handle(args: &ValidateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = read_input(args.file.as_deref())?;
    let value: Value = serde_json::from_str(&input).context("input is not valid JSON")?;
    tracing::debug!(schema = %args.name, bytes = input.len(), "validating payload");

    let registry = SchemaRegistry::catalog().context("failed to build schema catalog")?;
    let outcome = registry.safe_parse(&args.name, &value)?;
    output(&outcome, flags.format)?;

    if !outcome.is_success() {
        bail!(
            "{} violation(s) against schema '{}'",
            outcome.errors().len(),
            args.name
        );
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
