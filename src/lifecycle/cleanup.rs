//! Periodic removal of expired pastes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::observability::metrics;
use crate::paste::unix_now;
use crate::storage::PasteStore;

/// Spawn the purge loop. The first purge runs after one full interval.
pub fn spawn_cleanup(
    store: Arc<dyn PasteStore>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    purge_once(store.as_ref()).await;
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Cleanup task stopping");
                    break;
                }
            }
        }
    })
}

/// Run one purge pass, logging instead of failing.
pub async fn purge_once(store: &dyn PasteStore) -> u64 {
    match store.purge_expired(unix_now()).await {
        Ok(purged) => {
            if purged > 0 {
                tracing::info!(purged, "Purged expired pastes");
            }
            metrics::record_purged(purged);
            purged
        }
        Err(e) => {
            tracing::error!(error = %e, "Purge of expired pastes failed");
            0
        }
    }
}
