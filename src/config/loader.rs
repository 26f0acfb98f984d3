//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AppConfig, DEV_SECRET};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `security.app_secret`.
pub const APP_SECRET_ENV: &str = "APP_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    finalize(read_config(path)?)
}

/// Read a TOML file without applying overrides or validating.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from TOML text without touching the environment.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides and defaults, then validate.
pub fn finalize(mut config: AppConfig) -> Result<AppConfig, ConfigError> {
    let env_secret = std::env::var(APP_SECRET_ENV).ok();
    apply_secret(&mut config, env_secret);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_secret(config: &mut AppConfig, env_secret: Option<String>) {
    if let Some(secret) = env_secret.filter(|s| !s.is_empty()) {
        config.security.app_secret = secret;
    }
    if config.security.app_secret.is_empty() {
        tracing::warn!(
            "No {} configured, falling back to the development secret",
            APP_SECRET_ENV
        );
        config.security.app_secret = DEV_SECRET.to_string();
    }
}
