//! trackctl-server: HTTP CRUD service for track records
//!
//! Maps five REST endpoints onto a single `tracks` table:
//! request parsing and validation in [`http`], persistence behind the
//! [`db::TrackStore`] trait, wire types in [`models`].

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig};
pub use error::{Error, Result};
