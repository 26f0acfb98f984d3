//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Secret used when none is configured. Only suitable for development.
pub const DEV_SECRET: &str = "dev_only_replace_me";

/// Root configuration for the paste service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Public listener configuration.
    pub listener: ListenerConfig,

    /// Admin listener configuration.
    pub admin: AdminConfig,

    /// Paste storage settings.
    pub storage: StorageConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Secrets for signing access cookies.
    pub security: SecurityConfig,

    /// Built single-page application.
    pub ui: UiConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Public listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Admin listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin listener.
    pub enabled: bool,

    /// Admin bind address. Keep this on loopback.
    pub bind_address: String,

    /// Optional bearer key. When unset the admin API is open to whoever can
    /// reach the bind address.
    pub api_key: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8787".to_string(),
            api_key: None,
        }
    }
}

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

/// Paste storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// SQLite database path.
    pub database_path: String,

    /// Interval between expired-paste purges in seconds.
    pub cleanup_interval_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_path: "data/pastes.db".to_string(),
            cleanup_interval_secs: 600,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum paste content size in bytes.
    pub max_content_bytes: usize,

    /// Extra room on top of the content for the other form fields.
    pub body_overhead_bytes: usize,
}

impl LimitsConfig {
    /// Hard cap on request bodies.
    pub fn max_body_bytes(&self) -> usize {
        self.max_content_bytes + self.body_overhead_bytes
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: 512 * 1024,
            body_overhead_bytes: 1024,
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HMAC key for paste access cookies. Overridden by `APP_SECRET`.
    pub app_secret: String,

    /// Lifetime of an access cookie in seconds.
    pub auth_cookie_max_age_secs: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            app_secret: String::new(),
            auth_cookie_max_age_secs: 24 * 3600,
        }
    }
}

/// Location of the built single-page application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Directory containing `index.html` and `assets/`.
    pub dist_dir: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dist_dir: "web/dist".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Time allowed for in-flight requests after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
