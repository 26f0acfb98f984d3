//! Paste sharing server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                   PASTE SHARE                    │
//!                     │                                                  │
//!   Browser           │  ┌──────────┐   ┌────────────┐   ┌───────────┐  │
//!   ──────────────────┼─▶│  public  │──▶│  handlers  │──▶│  storage  │  │
//!                     │  │ listener │   │  (api)     │   │ sqlite /  │  │
//!                     │  └────┬─────┘   └────────────┘   │  memory   │  │
//!                     │       │                          └─────▲─────┘  │
//!                     │       ▼                                │        │
//!                     │  ┌──────────┐   ┌────────────┐         │        │
//!                     │  │  assets  │   │ spa + route│         │        │
//!                     │  │ ServeDir │   │   table    │         │        │
//!                     │  └──────────┘   └────────────┘         │        │
//!                     │                                        │        │
//!   Operator          │  ┌──────────┐   ┌────────────┐         │        │
//!   ──────────────────┼─▶│  admin   │──▶│  list /    │─────────┤        │
//!                     │  │ listener │   │  purge     │         │        │
//!                     │  └──────────┘   └────────────┘   ┌─────┴─────┐  │
//!                     │                                  │  cleanup  │  │
//!                     │                                  │   task    │  │
//!                     │                                  └───────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use paste_share::config::{self, AppConfig, StorageBackend};
use paste_share::lifecycle;
use paste_share::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "paste-share")]
#[command(about = "Paste sharing server", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "PASTE_CONFIG")]
    config: Option<PathBuf>,

    /// Public HTTP address
    #[arg(long)]
    addr: Option<String>,

    /// Admin HTTP address
    #[arg(long)]
    admin: Option<String>,

    /// SQLite database path
    #[arg(long)]
    db: Option<String>,

    /// Keep pastes in memory only
    #[arg(long, conflicts_with = "db")]
    memory: bool,

    /// Built SPA directory
    #[arg(long)]
    ui: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(addr) = self.addr {
            config.listener.bind_address = addr;
        }
        if let Some(admin) = self.admin {
            config.admin.bind_address = admin;
        }
        if let Some(db) = self.db {
            config.storage.backend = StorageBackend::Sqlite;
            config.storage.database_path = db;
        }
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
        if let Some(ui) = self.ui {
            config.ui.dist_dir = ui;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::read_config(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);

    init_logging(&config.observability);
    tracing::info!("paste-share v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::finalize(config)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        admin_address = %config.admin.bind_address,
        backend = ?config.storage.backend,
        ui = %config.ui.dist_dir,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
