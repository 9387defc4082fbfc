//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path id is not a non-negative integer that fits the id column
    InvalidId { value: String, reason: &'static str },

    /// Request body could not be decoded into a track
    InvalidPayload { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { value, reason } => {
                write!(f, "Invalid track ID. Error: parsing '{}': {}", value, reason)
            }
            Self::InvalidPayload { reason } => {
                write!(f, "Invalid request payload. Error: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
