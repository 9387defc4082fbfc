//! HTTP server command for the trackctl API
//!
//! Builds the database configuration from flags and environment, connects
//! the pool, then serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use trackctl_server::db::{create_pool, MemoryTrackStore, PgTrackStore, TrackStore};
use trackctl_server::http::{run_server, ServerConfig};
use trackctl_server::DatabaseConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8080", env = "TRACKCTL_BIND")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Full database URL (overrides the individual --db-* settings)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, default_value = "localhost", env = "TRACKCTL_DB_HOST")]
    pub db_host: String,

    /// Database port
    #[arg(long, default_value_t = 5432, env = "TRACKCTL_DB_PORT")]
    pub db_port: u16,

    /// Database user
    #[arg(long, default_value = "postgres", env = "TRACKCTL_DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "TRACKCTL_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, default_value = "track_db", env = "TRACKCTL_DB_NAME")]
    pub db_name: String,

    /// Database sslmode (disable, prefer, require, verify-ca, verify-full)
    #[arg(long, default_value = "disable", env = "TRACKCTL_DB_SSLMODE")]
    pub db_sslmode: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 5, env = "TRACKCTL_DB_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Keep tracks in process memory instead of PostgreSQL (ignores all --db-* settings)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            dbname: self.db_name.clone(),
            sslmode: self.db_sslmode.clone(),
            max_connections: self.max_connections,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn TrackStore> = if args.memory {
        tracing::warn!("Using in-memory store; tracks are lost on exit");
        Arc::new(MemoryTrackStore::new())
    } else {
        let db_config = args.database_config();
        tracing::info!(
            host = %db_config.host,
            port = db_config.port,
            dbname = %db_config.dbname,
            url_override = db_config.url.is_some(),
            "Connecting to database"
        );

        let pool = create_pool(&db_config)
            .await
            .context("Failed to connect to database")?;
        Arc::new(PgTrackStore::new(pool))
    };

    tracing::info!("Starting trackctl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(store, config).await.context("Server error")?;

    Ok(())
}
