//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the paste store
//! - Start background tasks (cleanup, metrics)
//! - Bind public and admin listeners and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)
//! - Shutdown waits for servers, bounded by a grace period

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::admin::setup_admin_router;
use crate::config::AppConfig;
use crate::http::server::{serve, AppState, HttpServer};
use crate::lifecycle::{cleanup::spawn_cleanup, signals::wait_for_signal, Shutdown};
use crate::observability::metrics;
use crate::storage::{open_store, StorageError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

async fn bind(address: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = open_store(&config.storage).await?;
    let state = AppState::new(&config, store.clone());
    let shutdown = Shutdown::new();

    let cleanup = spawn_cleanup(
        store,
        Duration::from_secs(config.storage.cleanup_interval_secs),
        shutdown.subscribe(),
    );

    let public = bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, state.clone());
    let mut servers = vec![tokio::spawn(server.run(public, shutdown.subscribe()))];

    if config.admin.enabled {
        let admin = bind(&config.admin.bind_address).await?;
        if config.admin.api_key.is_none() {
            tracing::warn!(
                address = %config.admin.bind_address,
                "Admin API has no key; keep it bound to a private address"
            );
        }
        servers.push(tokio::spawn(serve(
            admin,
            setup_admin_router(state),
            shutdown.subscribe(),
            "admin",
        )));
    }

    wait_for_signal().await;
    shutdown.trigger();

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let drained = tokio::time::timeout(grace, async {
        for server in servers {
            match server.await {
                Ok(Err(e)) => tracing::error!(error = %e, "Server exited with error"),
                Err(e) => tracing::error!(error = %e, "Server task panicked"),
                Ok(Ok(())) => {}
            }
        }
        let _ = cleanup.await;
    })
    .await;

    if drained.is_err() {
        tracing::warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed");
    }
    Ok(())
}
