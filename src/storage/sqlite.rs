//! SQLite paste store.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::paste::PasswordHash;
use crate::storage::{Paste, PasteStore, PasteSummary, StorageError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pastes(
  id TEXT PRIMARY KEY,
  content TEXT NOT NULL,
  syntax TEXT DEFAULT 'auto',
  allow_edit INTEGER NOT NULL DEFAULT 0,
  pw_salt BLOB,
  pw_hash BLOB,
  created_at INTEGER NOT NULL,
  expires_at INTEGER
);
CREATE INDEX IF NOT EXISTS idx_expires ON pastes(expires_at);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, content, syntax, allow_edit, pw_salt, pw_hash, created_at, expires_at FROM pastes";

/// Persistent store backed by a single SQLite file.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` in WAL mode.
    pub async fn open(path: &str) -> Result<Self, StorageError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path, "Opened SQLite database");
        Self::with_pool(pool).await
    }

    /// Private in-memory database, mostly for tests.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // Every connection would get its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

fn paste_from_row(row: &SqliteRow) -> Result<Paste, sqlx::Error> {
    let salt: Option<Vec<u8>> = row.try_get("pw_salt")?;
    let hash: Option<Vec<u8>> = row.try_get("pw_hash")?;
    let password = match (salt, hash) {
        (Some(salt), Some(hash)) if !hash.is_empty() => Some(PasswordHash::from_parts(salt, hash)),
        _ => None,
    };
    let syntax: Option<String> = row.try_get("syntax")?;

    Ok(Paste {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        syntax: syntax.unwrap_or_else(|| "auto".to_string()),
        allow_edit: row.try_get::<i64, _>("allow_edit")? != 0,
        password,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
    })
}

#[async_trait]
impl PasteStore for SqliteStore {
    async fn insert(&self, paste: &Paste) -> Result<(), StorageError> {
        let (salt, hash) = match &paste.password {
            Some(pw) => (Some(pw.salt.clone()), Some(pw.hash.clone())),
            None => (None, None),
        };
        sqlx::query(
            "INSERT INTO pastes(id, content, syntax, allow_edit, pw_salt, pw_hash, created_at, expires_at) \
             VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&paste.id)
        .bind(&paste.content)
        .bind(&paste.syntax)
        .bind(paste.allow_edit as i64)
        .bind(salt)
        .bind(hash)
        .bind(paste.created_at)
        .bind(paste.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::Duplicate(paste.id.clone())
            }
            other => StorageError::Database(other),
        })?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Paste>, StorageError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(paste_from_row).transpose()?)
    }

    async fn update_content(&self, id: &str, content: &str) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE pastes SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM pastes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: i64) -> Result<u64, StorageError> {
        let result =
            sqlx::query("DELETE FROM pastes WHERE expires_at IS NOT NULL AND expires_at < ?")
                .bind(now)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<PasteSummary>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, created_at, COALESCE(expires_at, 0) AS expires, allow_edit \
             FROM pastes ORDER BY created_at DESC, id ASC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(PasteSummary {
                    id: row.try_get("id")?,
                    created: row.try_get("created_at")?,
                    expires: row.try_get("expires")?,
                    allow_edit: row.try_get::<i64, _>("allow_edit")? != 0,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(StorageError::from)
    }
}
