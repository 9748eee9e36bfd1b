//! Tick-domain track events.
//!
//! Beat-relative notes become pairs of (tick, on/off) events here, fully
//! ordered before serialization so the emitted delta-times are
//! monotone and deterministic.

use melodica_core::{timing, Note};

/// Event kind. The derived ordering matters: `NoteOff` sorts before
/// `NoteOn` at the same tick, so a note ending exactly where another
/// begins never reads as a momentary silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum EventKind {
    NoteOff,
    NoteOn,
}

/// One channel event at an absolute tick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrackEvent {
    pub tick: u32,
    pub kind: EventKind,
    pub pitch: u8,
    /// Note-off events always carry velocity 0.
    pub velocity: u8,
}

/// Expand notes into a sorted on/off event list.
///
/// A note whose rounded on and off ticks coincide is stretched to one
/// tick; zero-length on/off pairs confuse standard readers.
pub(crate) fn events_from_notes(notes: &[Note]) -> Vec<TrackEvent> {
    let mut events = Vec::with_capacity(notes.len() * 2);

    for note in notes {
        let on = timing::beats_to_ticks(note.start);
        let mut off = timing::beats_to_ticks(note.end());
        if off <= on {
            off = on + 1;
        }

        events.push(TrackEvent {
            tick: on,
            kind: EventKind::NoteOn,
            pitch: note.pitch,
            velocity: note.velocity,
        });
        events.push(TrackEvent {
            tick: off,
            kind: EventKind::NoteOff,
            pitch: note.pitch,
            velocity: 0,
        });
    }

    // Tick, then off-before-on, then pitch for a fully deterministic stream
    events.sort_unstable_by_key(|e| (e.tick, e.kind, e.pitch));
    events
}
