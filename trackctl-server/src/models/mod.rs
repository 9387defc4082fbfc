//! Domain models with validation at construction
//!
//! Path input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod pagination;
pub mod track;
pub mod validation;

pub use pagination::{Page, PageParams};
pub use track::{Track, TrackId};
pub use validation::ValidationError;
