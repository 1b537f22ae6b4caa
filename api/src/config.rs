//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which observation store the server reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Process-local store, empty at startup.
    #[default]
    Memory,
    /// `ClickHouse` database configured through `SKYLOG_DB_*`.
    ClickHouse,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "clickhouse" => Ok(Self::ClickHouse),
            other => bail!("unknown storage backend '{other}', expected 'memory' or 'clickhouse'"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `SKYLOG_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `SKYLOG_PORT`: The port to listen on (default: 8080)
/// - `SKYLOG_STORAGE`: `memory` or `clickhouse` (default: memory)
/// - `SKYLOG_STATIC_DIR`: Directory served for non-API paths (default: none)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Observation store backend.
    pub storage: StorageBackend,
    /// Optional directory of static files.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SKYLOG_PORT` is set but cannot be parsed as a valid port number
    /// - `SKYLOG_STORAGE` names an unknown backend
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("SKYLOG_HOST").unwrap_or(defaults.host);

        let port = lookup("SKYLOG_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("SKYLOG_PORT must be a valid port number")?
            .unwrap_or(defaults.port);

        let storage = lookup("SKYLOG_STORAGE")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(defaults.storage);

        let static_dir = lookup("SKYLOG_STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            storage,
            static_dir,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port do not form a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            static_dir: None,
        }
    }
}
