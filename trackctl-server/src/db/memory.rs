//! In-process track store
//!
//! Same contract as the Postgres repository: ids start at 1 and are never
//! reused, pages come back in id order, update/delete of a missing id is a
//! no-op. Nothing survives the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{StoreError, TrackStore};
use crate::models::{Page, Track, TrackId};

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, String>,
}

/// Track store held in memory
#[derive(Debug, Default)]
pub struct MemoryTrackStore {
    inner: RwLock<Inner>,
}

impl MemoryTrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tracks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TrackStore for MemoryTrackStore {
    async fn fetch_one(&self, id: TrackId) -> Result<Track, StoreError> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(&id.get())
            .map(|song| Track::new(id.get(), song.clone()))
            .ok_or(StoreError::NotFound { id: id.get() })
    }

    async fn fetch_page(&self, page: Page) -> Result<Vec<Track>, StoreError> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(0);

        Ok(inner
            .rows
            .iter()
            .skip(skip)
            .take(take)
            .map(|(id, song)| Track::new(*id, song.clone()))
            .collect())
    }

    async fn create(&self, track: Track) -> Result<Track, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.last_id.checked_add(1).ok_or_else(|| {
            StoreError::Sqlx(sqlx::Error::Protocol("track id sequence exhausted".into()))
        })?;
        inner.last_id = id;
        inner.rows.insert(id, track.song.clone());

        Ok(Track { id, ..track })
    }

    async fn update(&self, track: &Track) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(song) = inner.rows.get_mut(&track.id) {
            *song = track.song.clone();
        }
        Ok(())
    }

    async fn delete(&self, track: &Track) -> Result<(), StoreError> {
        self.inner.write().await.rows.remove(&track.id);
        Ok(())
    }
}
