//! Database layer - connection pool, store contract and repositories
//!
//! # Design Principles
//!
//! - Connection pool shared through `PgPool` clones, no Arc<Mutex<Connection>>
//! - One statement per operation, no transactions across operations
//! - Backend errors carried in StoreError, never matched on as opaque values

pub mod memory;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryTrackStore;
pub use pool::{create_pool, create_pool_from_url};
pub use repos::PgTrackStore;
pub use store::{StoreError, TrackStore};
