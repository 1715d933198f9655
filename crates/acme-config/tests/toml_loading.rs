//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use acme_config::{AcmeConfig, ConfigError, ServerConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_openapi_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[openapi]
output = "dist/api.json"
title = "Internal Tickets"
version = "2.1.0"
description = ""

[[openapi.servers]]
url = "http://localhost:8080"
description = "Local"
"#,
        )?;

        let config: AcmeConfig = Figment::from(Serialized::defaults(AcmeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.openapi.output, "dist/api.json");
        assert_eq!(config.openapi.title, "Internal Tickets");
        assert_eq!(config.openapi.version, "2.1.0");
        assert!(config.openapi.description.is_empty());
        assert_eq!(
            config.openapi.servers,
            vec![ServerConfig {
                url: "http://localhost:8080".to_string(),
                description: "Local".to_string(),
            }]
        );
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[openapi]\nversion = \"3.0.0\"\n")?;

        let config: AcmeConfig = Figment::from(Serialized::defaults(AcmeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.openapi.version, "3.0.0");
        assert_eq!(config.openapi.output, "openapi/tickets.openapi.json");
        assert_eq!(config.openapi.servers.len(), 2);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".acme")?;
        jail.create_file(".acme/config.toml", "[openapi]\ntitle = \"Project Title\"\n")?;

        let config = AcmeConfig::load().expect("config loads");
        assert_eq!(config.openapi.title, "Project Title");
        Ok(())
    });
}

#[test]
fn load_rejects_empty_server_url() {
    Jail::expect_with(|jail| {
        jail.create_dir(".acme")?;
        jail.create_file(
            ".acme/config.toml",
            "[openapi]\n[[openapi.servers]]\nurl = \"\"\n",
        )?;

        let err = AcmeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".acme")?;
        jail.create_file(".acme/config.toml", "[openapi\ntitle = 1\n")?;

        let err = AcmeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
