//! Database configuration
//!
//! Connection settings are passed in explicitly at startup. The CLI fills
//! them from flags and environment; nothing here reads global state.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("invalid sslmode '{0}' (expected disable, allow, prefer, require, verify-ca or verify-full)")]
    InvalidSslMode(String),
}

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; when set, the individual fields are ignored
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub sslmode: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            dbname: "track_db".to_string(),
            sslmode: "disable".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options from this configuration.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::InvalidUrl(e.to_string()));
        }

        let ssl_mode = PgSslMode::from_str(&self.sslmode)
            .map_err(|_| ConfigError::InvalidSslMode(self.sslmode.clone()))?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname)
            .ssl_mode(ssl_mode);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}
