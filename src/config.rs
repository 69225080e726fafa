//! Worker configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the worker
//! subscribes to anything.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - Postgres connection string
//! - `REDIS_URL` - Redis connection string (bus transport)
//! - `BUS_SCOPE` - namespace isolating this deployment's bus traffic
//!   (e.g. `"test"`, `"staging"`, `"production"`)
//!
//! ## Optional Variables
//!
//! - `FETCH_TIMEOUT_SECONDS` - bound on the outbound redirect probe (default: 10)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Postgres pool size (default: 10)

use anyhow::{Context, Result};
use std::env;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Namespace prefix applied to every bus channel. Two deployments with
    /// different scopes can share one Redis instance without cross-delivery.
    pub bus_scope: String,
    pub log_level: String,
    pub log_format: String,
    /// Timeout in seconds for the outbound redirect probe.
    pub fetch_timeout_seconds: u64,
    /// Maximum number of connections in the Postgres pool (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL`, `REDIS_URL`, or `BUS_SCOPE` is missing,
    /// or if `BUS_SCOPE` contains `*` or `:` (which would break channel namespacing).
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let redis_url = env::var("REDIS_URL").context("REDIS_URL must be set")?;
        let bus_scope = env::var("BUS_SCOPE").context("BUS_SCOPE must be set")?;

        if bus_scope.is_empty() || bus_scope.contains(|c| c == '*' || c == ':') {
            anyhow::bail!("BUS_SCOPE must be non-empty and must not contain '*' or ':'");
        }

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            redis_url,
            bus_scope,
            log_level,
            log_format,
            fetch_timeout_seconds,
            db_max_connections,
        })
    }
}
