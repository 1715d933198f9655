//! OpenAPI export settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_output() -> String {
    "openapi/tickets.openapi.json".to_string()
}

fn default_title() -> String {
    "Acme Tickets API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_description() -> String {
    "API for managing tickets in the Acme platform".to_string()
}

fn default_servers() -> Vec<ServerConfig> {
    vec![
        ServerConfig {
            url: "https://api.acme.com".to_string(),
            description: "Production server".to_string(),
        },
        ServerConfig {
            url: "https://api.staging.acme.com".to_string(),
            description: "Staging server".to_string(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OpenApiConfig {
    /// Where the exported document is written, relative to the working directory.
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_version")]
    pub version: String,

    /// Empty means the document carries no `info.description`.
    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_servers")]
    pub servers: Vec<ServerConfig>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            title: default_title(),
            version: default_version(),
            description: default_description(),
            servers: default_servers(),
        }
    }
}

impl OpenApiConfig {
    /// Reject settings that would produce an unusable document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty output path, title,
    /// or version, or a server with an empty URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("openapi.output", &self.output),
            ("openapi.title", &self.title),
            ("openapi.version", &self.version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if let Some(index) = self.servers.iter().position(|s| s.url.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("openapi.servers[{index}].url"),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
