//! In-memory paste store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::storage::{Paste, PasteStore, PasteSummary, StorageError};

/// A thread-safe, non-persistent store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, Paste>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn insert(&self, paste: &Paste) -> Result<(), StorageError> {
        match self.inner.entry(paste.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::Duplicate(paste.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(paste.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Paste>, StorageError> {
        Ok(self.inner.get(id).map(|r| r.value().clone()))
    }

    async fn update_content(&self, id: &str, content: &str) -> Result<(), StorageError> {
        let mut entry = self
            .inner
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        entry.content = content.to_string();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.inner.remove(id).is_some())
    }

    async fn purge_expired(&self, now: i64) -> Result<u64, StorageError> {
        let mut purged = 0u64;
        self.inner.retain(|_, p| {
            let keep = !p.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        Ok(purged)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<PasteSummary>, StorageError> {
        let mut rows: Vec<PasteSummary> = self
            .inner
            .iter()
            .map(|r| PasteSummary::from(r.value()))
            .collect();
        rows.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.id.cmp(&b.id)));
        rows.truncate(limit);
        Ok(rows)
    }
}
