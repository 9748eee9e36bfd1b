//! Beats, seconds, and MIDI ticks.
//!
//! All musical time in melodica is beat-relative; these helpers convert
//! to wall-clock seconds (for rendering and playback) and to MIDI ticks
//! (for file serialization) at a given tempo.

use crate::error::ValidationError;

/// Ticks per quarter note used by the MIDI serializer.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Largest value the 3-byte tempo meta event can carry.
const MAX_MICROS_PER_QUARTER: f64 = 0xFF_FF_FF as f64;

/// Duration of one beat in seconds at `bpm`.
pub fn seconds_per_beat(bpm: f64) -> f64 {
    60.0 / bpm
}

/// Convert a beat offset or length to seconds at `bpm`.
pub fn beats_to_seconds(beats: f64, bpm: f64) -> f64 {
    beats * seconds_per_beat(bpm)
}

/// Convert a beat position to an absolute tick at [`TICKS_PER_QUARTER`]
/// resolution, rounding to the nearest tick.
pub fn beats_to_ticks(beats: f64) -> u32 {
    (beats * TICKS_PER_QUARTER as f64).round() as u32
}

/// MIDI tempo meta value: microseconds per quarter note, rounded.
///
/// Only meaningful for a tempo that passed [`validate_bpm`].
pub fn micros_per_quarter(bpm: f64) -> u32 {
    (60_000_000.0 / bpm).round() as u32
}

/// Check that a tempo is usable by every pipeline stage.
///
/// Rejects non-finite and non-positive values, and tempos so slow their
/// microseconds-per-quarter would overflow the 3-byte field in the MIDI
/// tempo meta event. Rejection is explicit; no stage ever clamps a tempo
/// behind the caller's back.
pub fn validate_bpm(bpm: f64) -> Result<(), ValidationError> {
    if !bpm.is_finite() || bpm <= 0.0 || (60_000_000.0 / bpm).round() > MAX_MICROS_PER_QUARTER {
        return Err(ValidationError::Tempo(bpm));
    }
    Ok(())
}
