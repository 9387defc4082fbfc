//! Repository implementations for database access
//!
//! Repositories issue parameterized statements only and leave pooling,
//! concurrency and connection limits to sqlx.

pub mod tracks;

pub use tracks::PgTrackStore;
