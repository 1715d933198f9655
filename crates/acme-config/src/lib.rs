//! # acme-config
//!
//! Layered configuration loading for the contract tooling using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ACME_*` prefix, `__` as separator)
//! 2. Project-level `.acme/config.toml`
//! 3. User-level `~/.config/acme/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `ACME_OPENAPI__OUTPUT` -> `openapi.output`,
//! `ACME_OPENAPI__TITLE` -> `openapi.title`, etc.
//!
//! ```no_run
//! use acme_config::AcmeConfig;
//!
//! let config = AcmeConfig::load_with_dotenv().expect("config");
//! println!("writing to {}", config.openapi.output);
//! ```

mod error;
mod openapi;

pub use error::ConfigError;
pub use openapi::{OpenApiConfig, ServerConfig};

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "ACME_";
pub const PROJECT_CONFIG: &str = ".acme/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AcmeConfig {
    #[serde(default)]
    pub openapi: OpenApiConfig,
}

impl AcmeConfig {
    /// Load configuration from TOML files and environment variables, then
    /// validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on a malformed source, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the working directory or
    /// the nearest parent that has one. A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and callers can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.openapi.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("acme").join("config.toml"))
    }
}
