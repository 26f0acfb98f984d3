//! Paste storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP / admin handlers
//!     → PasteStore trait (async)
//!     → sqlite.rs (sqlx, persistent, WAL)
//!     → memory.rs (dashmap, ephemeral)
//!
//! Cleanup task (lifecycle):
//!     → purge_expired(now) on an interval
//! ```
//!
//! # Design Decisions
//! - Handlers see only the trait object; backend chosen by config
//! - Expiry is checked at read time too, purging only reclaims space
//! - Timestamps are Unix seconds

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::paste::PasswordHash;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Maximum number of rows returned by [`PasteStore::list_recent`] callers.
pub const ADMIN_LIST_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("paste `{0}` not found")]
    NotFound(String),
    #[error("paste `{0}` already exists")]
    Duplicate(String),
}

/// A stored paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub syntax: String,
    pub allow_edit: bool,
    pub password: Option<PasswordHash>,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}

impl Paste {
    /// Expired pastes are treated as gone even before the purge runs.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|t| t < now)
    }

    pub fn is_protected(&self) -> bool {
        self.password.is_some()
    }
}

/// Row of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteSummary {
    pub id: String,
    pub created: i64,
    /// 0 when the paste never expires.
    pub expires: i64,
    pub allow_edit: bool,
}

impl From<&Paste> for PasteSummary {
    fn from(p: &Paste) -> Self {
        Self {
            id: p.id.clone(),
            created: p.created_at,
            expires: p.expires_at.unwrap_or(0),
            allow_edit: p.allow_edit,
        }
    }
}

#[async_trait]
pub trait PasteStore: Send + Sync {
    async fn insert(&self, paste: &Paste) -> Result<(), StorageError>;

    async fn get(&self, id: &str) -> Result<Option<Paste>, StorageError>;

    /// Replace the content. Fails with `NotFound` for unknown ids.
    async fn update_content(&self, id: &str, content: &str) -> Result<(), StorageError>;

    /// Delete a paste. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;

    /// Remove pastes whose expiry lies before `now`. Returns the count.
    async fn purge_expired(&self, now: i64) -> Result<u64, StorageError>;

    /// Newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<PasteSummary>, StorageError>;
}

/// Open the store selected by configuration.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn PasteStore>, StorageError> {
    let store: Arc<dyn PasteStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.database_path).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!(backend = ?config.backend, "Paste store ready");
    Ok(store)
}
