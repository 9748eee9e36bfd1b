//! The note event data contract.
//!
//! Notes arrive from the upstream pattern generator as JSON
//! (`{"pitch": 60, "start": 0, "duration": 1, "velocity": 100}`) and are
//! consumed read-only by every pipeline stage. Times are expressed in
//! beats so the same sequence can be serialized or auditioned at any
//! tempo.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// One musical note event.
///
/// Immutable value data. Overlapping notes are legal and mix additively;
/// insertion order within a sequence carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (0-127, 60 = middle C).
    pub pitch: u8,
    /// Offset from pattern start, in beats. Non-negative.
    pub start: f64,
    /// Length in beats. Must be positive.
    pub duration: f64,
    /// Key velocity (0-127), controls peak loudness.
    pub velocity: u8,
}

impl Note {
    pub fn new(pitch: u8, start: f64, duration: f64, velocity: u8) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity,
        }
    }

    /// End of the note in beats (`start + duration`).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.pitch > 127 {
            return Err(ValidationError::Pitch {
                index,
                pitch: self.pitch,
            });
        }
        if self.velocity > 127 {
            return Err(ValidationError::Velocity {
                index,
                velocity: self.velocity,
            });
        }
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(ValidationError::Start {
                index,
                start: self.start,
            });
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ValidationError::Duration {
                index,
                duration: self.duration,
            });
        }
        Ok(())
    }
}

/// Validate every note in a sequence.
///
/// Fails on the first out-of-range field, identifying the offending note
/// by index. An empty sequence is valid.
pub fn validate_sequence(notes: &[Note]) -> Result<(), ValidationError> {
    for (index, note) in notes.iter().enumerate() {
        note.validate(index)?;
    }
    Ok(())
}

/// Total span of a sequence in beats: the largest `start + duration`,
/// or 0 for an empty sequence.
pub fn sequence_span(notes: &[Note]) -> f64 {
    notes.iter().map(Note::end).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_end() {
        let note = Note::new(60, 2.0, 1.5, 100);
        assert_eq!(note.end(), 3.5);
    }

    #[test]
    fn test_validate_ok() {
        let notes = vec![
            Note::new(0, 0.0, 0.25, 0),
            Note::new(127, 3.0, 4.0, 127),
        ];
        assert!(validate_sequence(&notes).is_ok());
        assert!(validate_sequence(&[]).is_ok());
    }

    #[test]
    fn test_validate_pitch_out_of_range() {
        let notes = vec![Note::new(60, 0.0, 1.0, 100), Note::new(128, 1.0, 1.0, 100)];
        assert_eq!(
            validate_sequence(&notes),
            Err(ValidationError::Pitch {
                index: 1,
                pitch: 128
            })
        );
    }

    #[test]
    fn test_validate_velocity_out_of_range() {
        let notes = vec![Note::new(60, 0.0, 1.0, 200)];
        assert_eq!(
            validate_sequence(&notes),
            Err(ValidationError::Velocity {
                index: 0,
                velocity: 200
            })
        );
    }

    #[test]
    fn test_validate_zero_duration() {
        let notes = vec![Note::new(60, 0.0, 0.0, 100)];
        assert!(matches!(
            validate_sequence(&notes),
            Err(ValidationError::Duration { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_negative_start() {
        let notes = vec![Note::new(60, -0.5, 1.0, 100)];
        assert!(matches!(
            validate_sequence(&notes),
            Err(ValidationError::Start { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_non_finite_fields() {
        assert!(validate_sequence(&[Note::new(60, f64::NAN, 1.0, 100)]).is_err());
        assert!(validate_sequence(&[Note::new(60, 0.0, f64::INFINITY, 100)]).is_err());
    }

    #[test]
    fn test_sequence_span() {
        assert_eq!(sequence_span(&[]), 0.0);

        // Span follows the latest-ending note, not the last in the list
        let notes = vec![
            Note::new(60, 0.0, 8.0, 100),
            Note::new(64, 2.0, 1.0, 100),
        ];
        assert_eq!(sequence_span(&notes), 8.0);
    }

    #[test]
    fn test_json_round_trip() {
        // The upstream generator speaks exactly this shape
        let json = r#"[{"pitch":60,"start":0.0,"duration":1.0,"velocity":100}]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(notes, vec![Note::new(60, 0.0, 1.0, 100)]);

        let back = serde_json::to_string(&notes).unwrap();
        let again: Vec<Note> = serde_json::from_str(&back).unwrap();
        assert_eq!(again, notes);
    }
}
