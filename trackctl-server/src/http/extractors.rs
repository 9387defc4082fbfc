//! Custom Axum extractors
//!
//! Both reject with [`ApiError::Validation`] so malformed input always
//! produces a 400 with the JSON error body, never axum's plain-text rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{Track, TrackId, ValidationError};

/// Extract and validate a track id from path
pub struct ValidTrackId(pub TrackId);

impl<S> FromRequestParts<S> for ValidTrackId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidId {
                    value: e.body_text(),
                    reason: "missing path parameter",
                })
            })?;

        Ok(Self(TrackId::parse(&raw)?))
    }
}

/// Decode a track from the request body.
///
/// The `Content-Type` header is not inspected.
pub struct TrackBody(pub Track);

impl<S> FromRequest<S> for TrackBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidPayload {
                reason: e.body_text(),
            })
        })?;

        let track = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Validation(ValidationError::InvalidPayload {
                reason: e.to_string(),
            })
        })?;

        Ok(Self(track))
    }
}
