//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI flags
//!     → loader.rs (parse & deserialize)
//!     → APP_SECRET env override
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize, load_config, read_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ListenerConfig;
pub use schema::AdminConfig;
pub use schema::StorageBackend;
pub use schema::StorageConfig;
pub use schema::LimitsConfig;
pub use schema::ObservabilityConfig;
