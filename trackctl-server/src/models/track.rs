//! Track record and path id validation
//!
//! Id format: non-negative decimal digits that fit the `SERIAL` column.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Digits only, matching the route pattern `{id:[0-9]+}`
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("invalid id regex"));

/// One row of the `tracks` table.
///
/// Missing fields decode to their defaults and unknown fields are ignored,
/// so `{"song": "x"}` and `{"song": "x", "extra": 1}` are both valid bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Track {
    pub id: i32,
    pub song: String,
}

impl Track {
    pub fn new(id: i32, song: impl Into<String>) -> Self {
        Self {
            id,
            song: song.into(),
        }
    }

    /// Replace the id, discarding whatever the body carried.
    pub fn with_id(mut self, id: TrackId) -> Self {
        self.id = id.get();
        self
    }
}

/// Validated track id taken from a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(i32);

impl TrackId {
    /// Parse a path segment into a track id.
    ///
    /// # Example
    /// ```
    /// use trackctl_server::models::TrackId;
    ///
    /// assert_eq!(TrackId::parse("42").unwrap().get(), 42);
    /// assert!(TrackId::parse("abc").is_err());
    /// assert!(TrackId::parse("-1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !ID_RE.is_match(s) {
            return Err(ValidationError::InvalidId {
                value: s.to_owned(),
                reason: "invalid syntax",
            });
        }

        s.parse::<i32>().map(Self).map_err(|_| ValidationError::InvalidId {
            value: s.to_owned(),
            reason: "value out of range",
        })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
