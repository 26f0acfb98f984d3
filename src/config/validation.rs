//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Detect public/admin listeners sharing an address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("public and admin listeners both bind {0}")]
    AddressConflict(String),
    #[error("storage.database_path must not be empty for the sqlite backend")]
    MissingDatabasePath,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.bind_address == config.listener.bind_address {
            errors.push(ValidationError::AddressConflict(
                config.admin.bind_address.clone(),
            ));
        }
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.limits.max_content_bytes == 0 {
        errors.push(ValidationError::NotPositive("limits.max_content_bytes"));
    }
    if config.storage.cleanup_interval_secs == 0 {
        errors.push(ValidationError::NotPositive("storage.cleanup_interval_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::NotPositive("timeouts.request_secs"));
    }
    if config.security.auth_cookie_max_age_secs <= 0 {
        errors.push(ValidationError::NotPositive("security.auth_cookie_max_age_secs"));
    }
    if config.storage.backend == crate::config::StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        errors.push(ValidationError::MissingDatabasePath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
