//! Track repository over PostgreSQL
//!
//! Each operation is a single parameterized statement against `tracks`:
//! - fetch_one: point lookup, no row maps to StoreError::NotFound
//! - fetch_page: LIMIT/OFFSET with no ORDER BY
//! - update/delete: affected rows are logged, never checked

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::store::{StoreError, TrackStore};
use crate::models::{Page, Track, TrackId};

/// Track repository backed by a connection pool
#[derive(Debug, Clone)]
pub struct PgTrackStore {
    pool: PgPool,
}

impl PgTrackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackStore for PgTrackStore {
    async fn fetch_one(&self, id: TrackId) -> Result<Track, StoreError> {
        sqlx::query_as::<_, Track>("SELECT id, song FROM tracks WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id: id.get() })
    }

    async fn fetch_page(&self, page: Page) -> Result<Vec<Track>, StoreError> {
        let tracks = sqlx::query_as::<_, Track>("SELECT id, song FROM tracks LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(tracks)
    }

    async fn create(&self, track: Track) -> Result<Track, StoreError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO tracks (song) VALUES ($1) RETURNING id")
            .bind(&track.song)
            .fetch_one(&self.pool)
            .await?;

        Ok(Track { id, ..track })
    }

    async fn update(&self, track: &Track) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE tracks SET song = $1 WHERE id = $2")
            .bind(&track.song)
            .bind(track.id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id = track.id, rows_affected = result.rows_affected(), "track updated");
        Ok(())
    }

    async fn delete(&self, track: &Track) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(track.id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id = track.id, rows_affected = result.rows_affected(), "track deleted");
        Ok(())
    }
}
