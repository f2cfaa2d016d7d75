//! Error types for the edge resizer.
//!
//! Every failure ends the invocation with a generated response. The only
//! distinction that reaches the viewer is whether the origin supplied an HTTP
//! status of its own (surfaced unchanged) or not (surfaced as a 500).

use crate::transform::TransformError;

/// Edge resizer error type.
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// The origin fetch failed.
    #[error("origin fetch failed: {message}")]
    Origin {
        /// HTTP status returned by the store, if the request got that far.
        status: Option<u16>,
        /// Error detail.
        message: String,
    },

    /// The object was recognised but could not be transformed.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// The event is missing something the resizer needs.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Anything else.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl EdgeError {
    /// The origin's own status code, when it is a valid non-2xx HTTP status.
    #[must_use]
    pub fn origin_status(&self) -> Option<u16> {
        match self {
            Self::Origin {
                status: Some(status),
                ..
            } if (100..=599).contains(status) && !(200..300).contains(status) => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result type for edge resizer operations.
pub type EdgeResult<T> = Result<T, EdgeError>;
