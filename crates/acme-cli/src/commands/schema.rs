use acme_schema::SchemaRegistry;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `acme-contracts schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::catalog().context("failed to build schema catalog")?;

    match &args.name {
        Some(name) => {
            let document = registry.document(name).with_context(|| {
                format!("unknown schema '{name}' (run `acme-contracts schema` to list names)")
            })?;
            output(document, flags.format)
        }
        None => output(&registry.list(), flags.format),
    }
}
