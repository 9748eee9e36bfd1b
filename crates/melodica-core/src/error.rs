//! Error types for melodica-core.

use thiserror::Error;

/// A note sequence or tempo failed validation.
///
/// Raised before any encoding or rendering work begins; a sequence with
/// one bad note fails entirely rather than having that note skipped or
/// its fields clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    #[error("note {index}: pitch {pitch} out of MIDI range 0-127")]
    Pitch { index: usize, pitch: u8 },

    #[error("note {index}: velocity {velocity} out of MIDI range 0-127")]
    Velocity { index: usize, velocity: u8 },

    #[error("note {index}: start {start} must be finite and non-negative")]
    Start { index: usize, start: f64 },

    #[error("note {index}: duration {duration} must be finite and positive")]
    Duration { index: usize, duration: f64 },

    #[error("invalid tempo: {0} BPM. Must be finite, positive, and at least 4 BPM so the microseconds-per-quarter fits the 3-byte MIDI tempo field")]
    Tempo(f64),
}
