//! Directory configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables (`DATABASE_URL`, `POOL__MAX_CONNECTIONS`, ...).

use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Connection configuration for the warehouse directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Connection pool sizing.
    #[serde(default)]
    pub pool: PoolConfig,
}

/// Pool-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a connection before giving up.
    #[serde(default = "default_acquire_timeout_seconds")]
    pub acquire_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_seconds() -> u64 {
    30
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout_seconds(),
        }
    }
}

impl DirectoryConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Opens a connection pool against the configured database.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.pool.max_connections)
            .acquire_timeout(Duration::from_secs(self.pool.acquire_timeout_seconds))
            .connect(&self.database_url)
            .await
    }
}
