//! Store gateway contract for tracks
//!
//! Handlers only see this trait, so the Postgres repository and the
//! in-memory store are interchangeable behind `Arc<dyn TrackStore>`.

use async_trait::async_trait;

use crate::models::{Page, Track, TrackId};

/// Data-access error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any backend failure; the message is the driver's text verbatim
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    /// Point lookup matched no row
    #[error("no track with id {id}")]
    NotFound { id: i32 },
}

/// Track persistence operations, one backend round trip each.
#[async_trait]
pub trait TrackStore: Send + Sync + 'static {
    /// Load the track with the given id.
    async fn fetch_one(&self, id: TrackId) -> Result<Track, StoreError>;

    /// Load one page of tracks. Empty once `page.offset()` passes the last row.
    async fn fetch_page(&self, page: Page) -> Result<Vec<Track>, StoreError>;

    /// Insert `track.song` and return the track carrying its generated id.
    async fn create(&self, track: Track) -> Result<Track, StoreError>;

    /// Overwrite the song of `track.id`. A missing row is not an error.
    async fn update(&self, track: &Track) -> Result<(), StoreError>;

    /// Remove the row `track.id`. A missing row is not an error.
    async fn delete(&self, track: &Track) -> Result<(), StoreError>;
}
