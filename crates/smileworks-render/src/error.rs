//! Error types for block rendering.

use thiserror::Error;

/// Result type alias using `RenderError`.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] crate::template::TemplateError),
}
