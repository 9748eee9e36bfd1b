//! Error types for melodica-export.

use melodica_core::ValidationError;
use thiserror::Error;

/// Render/export error type.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The sequence or tempo failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The caller required notes and the sequence was empty.
    #[error("empty sequence: nothing to render")]
    EmptyInput,

    /// A background render was cancelled before completing.
    #[error("render cancelled")]
    Cancelled,

    /// Container encoding failed.
    #[error("encoding error: {0}")]
    Encode(String),

    /// The background render worker died.
    #[error("render error: {0}")]
    Render(String),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

impl From<hound::Error> for RenderError {
    fn from(e: hound::Error) -> Self {
        RenderError::Encode(e.to_string())
    }
}
