//! Postgres pool and migrations

use crate::config::{mask_password, DatabaseConfig};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

/// Pool sizing and timeouts
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(10 * 60),
            max_lifetime: Duration::from_secs(30 * 60),
        }
    }
}

impl PoolConfig {
    /// `min_connections` capped at `max_connections`
    fn effective_min_connections(&self) -> u32 {
        self.min_connections.min(self.max_connections)
    }
}

/// Connect a pool for the invitations database
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    let min_connections = config.effective_min_connections();
    if min_connections != config.min_connections {
        warn!(
            "database.min_connections ({}) exceeds max_connections, using {}",
            config.min_connections, min_connections
        );
    }

    info!(
        url = %mask_password(&config.url),
        max_connections = config.max_connections,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Some(config.idle_timeout))
        .max_lifetime(Some(config.max_lifetime))
        .connect(&config.url)
        .await
}

/// Apply pending migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
