//! Error types for content backend operations.
//!
//! These errors never cross the data-access boundary: every typed accessor
//! catches them, logs with a fixed context label, and returns an empty
//! result instead.

use thiserror::Error;

/// Result type alias using `CmsError`.
pub type Result<T> = std::result::Result<T, CmsError>;

/// Errors raised while talking to the content backend.
#[derive(Error, Debug)]
pub enum CmsError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body failed to decode.
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Core-level error (content decoding, configuration).
    #[error(transparent)]
    Core(#[from] smileworks_core::CoreError),

    /// Login against the backend's auth endpoint failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// No backend is configured; writes are rejected.
    #[error("content backend is not configured")]
    Offline,
}
