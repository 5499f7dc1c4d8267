//! Daemon configuration from environment variables

use prioq_api_rpc::RpcServerConfig;
use prioq_core::error::{AppError, Result};
use prioq_infra_sqlite::StoreConfig;
use std::str::FromStr;

pub const ENV_DB_PATH: &str = "PRIOQ_DB_PATH";
pub const ENV_DB_MAX_CONNECTIONS: &str = "PRIOQ_DB_MAX_CONNECTIONS";
pub const ENV_RPC_HOST: &str = "PRIOQ_RPC_HOST";
pub const ENV_RPC_PORT: &str = "PRIOQ_RPC_PORT";
pub const ENV_LOG_FORMAT: &str = "PRIOQ_LOG_FORMAT";

const DEFAULT_DB_PATH: &str = "~/.prioq/jobs.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines (production)
    Json,
    /// Human-readable with colors (development)
    Pretty,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub db_path: String,
    pub db_max_connections: u32,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_defaults = RpcServerConfig::default();

        let db_path = lookup(ENV_DB_PATH)
            .map(|path| shellexpand::tilde(&path).into_owned())
            .unwrap_or_else(|| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

        let log_format = match lookup(ENV_LOG_FORMAT).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            db_path,
            db_max_connections: parse_var(&lookup, ENV_DB_MAX_CONNECTIONS, DEFAULT_DB_MAX_CONNECTIONS)?,
            rpc_host: lookup(ENV_RPC_HOST).unwrap_or(rpc_defaults.host),
            rpc_port: parse_var(&lookup, ENV_RPC_PORT, rpc_defaults.port)?,
            log_format,
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::new(self.db_path.clone());
        config.max_connections = self.db_max_connections;
        config
    }

    pub fn rpc_config(&self) -> RpcServerConfig {
        RpcServerConfig {
            host: self.rpc_host.clone(),
            port: self.rpc_port,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw))),
    }
}
