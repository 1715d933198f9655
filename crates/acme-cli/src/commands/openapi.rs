use std::path::{Path, PathBuf};

use acme_config::{AcmeConfig, OpenApiConfig};
use acme_schema::openapi::{Info, Server, write_document};
use acme_schema::tickets_api::tickets_document;
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenapiArgs;
use crate::output::output;

/// Printed after a successful export.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub output: String,
    pub paths: usize,
    pub components: usize,
}

/// Handle `acme-contracts openapi`.
pub fn handle(args: &OpenapiArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = AcmeConfig::load_with_dotenv().context("failed to load configuration")?;
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.openapi.output));

    let summary = export(&config.openapi, &target)?;
    if !flags.quiet {
        output(&summary, flags.format)?;
    }
    Ok(())
}

/// Build the tickets document from `config` and write it to `target`.
pub fn export(config: &OpenApiConfig, target: &Path) -> anyhow::Result<ExportSummary> {
    tracing::debug!(path = %target.display(), title = %config.title, "exporting tickets document");
    let document = tickets_document(info_from(config), servers_from(config))
        .context("failed to build OpenAPI document")?;
    write_document(&document, target)?;

    let count = |pointer: &str| {
        document
            .pointer(pointer)
            .and_then(serde_json::Value::as_object)
            .map_or(0, serde_json::Map::len)
    };
    Ok(ExportSummary {
        output: target.display().to_string(),
        paths: count("/paths"),
        components: count("/components/schemas"),
    })
}

fn info_from(config: &OpenApiConfig) -> Info {
    Info {
        title: config.title.clone(),
        version: config.version.clone(),
        description: Some(config.description.clone()).filter(|d| !d.is_empty()),
    }
}

fn servers_from(config: &OpenApiConfig) -> Vec<Server> {
    config
        .servers
        .iter()
        .map(|server| Server {
            url: server.url.clone(),
            description: Some(server.description.clone()).filter(|d| !d.is_empty()),
        })
        .collect()
}
