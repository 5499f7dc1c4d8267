//! Prioq Daemon - Main Entry Point
//! Serves the priority queue over JSON-RPC, backed by SQLite

mod config;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use config::{DaemonConfig, LogFormat};
use prioq_api_rpc::RpcServer;
use prioq_core::application::QueueService;
use prioq_infra_sqlite::{create_pool_with, run_migrations, SqliteJobStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("prioq=info"))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Directory that must exist before SQLite can create the database file
fn db_parent_dir(db_path: &str) -> Option<&Path> {
    if db_path.contains(":memory:") {
        return None;
    }
    let file = db_path
        .strip_prefix("sqlite://")
        .or_else(|| db_path.strip_prefix("sqlite:"))
        .unwrap_or(db_path);
    let file = file.split('?').next().unwrap_or(file);

    Path::new(file)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    init_logging(config.log_format)?;

    info!("Prioq daemon v{} starting...", VERSION);
    info!(db_path = %config.db_path, "Initializing database...");

    // 3. Initialize database
    if let Some(parent) = db_parent_dir(&config.db_path) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let pool = create_pool_with(&config.store_config())
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let store = Arc::new(SqliteJobStore::new(pool.clone()));
    let service = Arc::new(QueueService::new(store.clone(), store));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_server = RpcServer::new(config.rpc_config(), service);
    let (addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;

    info!("Shutdown complete.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_parent_dir() {
        assert_eq!(
            db_parent_dir("/var/lib/prioq/jobs.db"),
            Some(Path::new("/var/lib/prioq"))
        );
        assert_eq!(
            db_parent_dir("sqlite:///data/jobs.db?mode=rwc"),
            Some(Path::new("/data"))
        );
        assert_eq!(db_parent_dir("jobs.db"), None);
        assert_eq!(db_parent_dir("sqlite::memory:"), None);
    }
}
