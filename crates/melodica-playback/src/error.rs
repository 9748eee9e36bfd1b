//! Error types for melodica-playback.

use melodica_core::ValidationError;
use thiserror::Error;

/// Error type for live playback.
///
/// Everything except [`Invalid`](PlaybackError::Invalid) is a resource
/// failure on the output device; after any of them the player is back
/// in the idle state, never stuck mid-session.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no output device available")]
    NoOutputDevice,

    #[error("audio device not available")]
    DeviceNotAvailable(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
