//! Standard MIDI File serializer.
//!
//! Encodes a validated note sequence into a format-0, single-track SMF
//! that any conformant reader accepts. The byte layout is emitted
//! explicitly (chunk headers, variable-length delta-times, big-endian
//! size fields) rather than going through a MIDI library, since the
//! event stream here is narrow: one tempo meta event, note-on/note-off
//! pairs on channel 0, end of track.
//!
//! # Example
//! ```
//! use melodica_core::Note;
//! use melodica_midi::encode_midi;
//!
//! let bytes = encode_midi(&[Note::new(60, 0.0, 1.0, 100)], 120.0).unwrap();
//! assert_eq!(&bytes[0..4], b"MThd");
//! ```

mod event;
mod writer;

use melodica_core::{note, timing, Note, ValidationError};
use thiserror::Error;
use tracing::debug;

/// Error type for MIDI encoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MidiEncodeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Result type for MIDI encoding.
pub type Result<T> = std::result::Result<T, MidiEncodeError>;

/// Encode a note sequence as a Standard MIDI File.
///
/// Pure and total once validation passes: an empty sequence yields a
/// minimal valid file carrying only the tempo and end-of-track meta
/// events. Notes may be given in any order; the emitted event stream is
/// sorted by tick with note-offs ahead of note-ons at the same tick, so
/// back-to-back notes never read as a moment of silence.
///
/// Fails with [`MidiEncodeError::Invalid`] on any out-of-range note
/// field or unusable tempo, before any bytes are produced.
pub fn encode_midi(notes: &[Note], bpm: f64) -> Result<Vec<u8>> {
    note::validate_sequence(notes)?;
    timing::validate_bpm(bpm)?;

    let events = event::events_from_notes(notes);
    debug!(
        notes = notes.len(),
        events = events.len(),
        bpm,
        "encoding MIDI file"
    );
    Ok(writer::write_file(&events, bpm))
}
