//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is built once
//! at startup; handlers only ever borrow connections through it.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool from a [`DatabaseConfig`].
///
/// Connects eagerly, so an unreachable database fails here rather than on
/// the first request.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default()).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, crate::Error> {
    let options = config.connect_options()?;
    let pool = create_pool_with_options(options, config.max_connections).await?;
    Ok(pool)
}

/// Create a PostgreSQL connection pool from a connection URL.
pub async fn create_pool_from_url(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `options` - Parsed connection options
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
