//! Track endpoints
//!
//! `PUT` and `DELETE` do not check that the row exists: a missing id
//! answers exactly like a successful write.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{TrackBody, ValidTrackId};
use crate::http::server::AppState;
use crate::models::{Page, PageParams, Track};

/// GET /tracks - list one page of tracks
async fn list_tracks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let page = Page::from(PageParams::from_pairs(pairs));
    let tracks = state.store.fetch_page(page).await?;
    Ok(Json(tracks))
}

/// GET /track/{id} - get a single track
async fn get_track(
    State(state): State<AppState>,
    ValidTrackId(id): ValidTrackId,
) -> Result<Json<Track>, ApiError> {
    let track = state.store.fetch_one(id).await?;
    Ok(Json(track))
}

/// POST /track - create a track, ignoring any id in the body
async fn create_track(
    State(state): State<AppState>,
    TrackBody(body): TrackBody,
) -> Result<(StatusCode, Json<Track>), ApiError> {
    let track = state.store.create(Track { id: 0, ..body }).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// PUT /track/{id} - overwrite the song; the path id wins over the body id
async fn update_track(
    State(state): State<AppState>,
    ValidTrackId(id): ValidTrackId,
    TrackBody(body): TrackBody,
) -> Result<Json<Track>, ApiError> {
    let track = body.with_id(id);
    state.store.update(&track).await?;
    Ok(Json(track))
}

/// DELETE /track/{id} - remove a track; empty 200 on success
async fn delete_track(
    State(state): State<AppState>,
    ValidTrackId(id): ValidTrackId,
) -> Result<StatusCode, ApiError> {
    let track = Track::default().with_id(id);
    state.store.delete(&track).await?;
    Ok(StatusCode::OK)
}

/// Track routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tracks", get(list_tracks))
        .route("/track", post(create_track))
        .route(
            "/track/{id}",
            get(get_track).put(update_track).delete(delete_track),
        )
}
