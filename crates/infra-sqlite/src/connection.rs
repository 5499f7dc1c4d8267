// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use prioq_core::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Store connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// File path, `sqlite://` URL, or `sqlite::memory:`
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Create SQLite connection pool with default settings
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    create_pool_with(&StoreConfig::new(database_url)).await
}

/// Create SQLite connection pool with WAL mode and optimizations
pub async fn create_pool_with(config: &StoreConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(map_sqlx_error)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;

    Ok(pool)
}
