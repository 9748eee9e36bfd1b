//! Binary SMF emission.
//!
//! Builds the track body first, then wraps it in chunk headers whose
//! size fields come from the materialized byte count. All multi-byte
//! integers outside delta-times are big-endian; delta-times use the
//! variable-length quantity encoding (base-128, high bit = continuation).

use crate::event::{EventKind, TrackEvent};
use melodica_core::timing;

/// All channel events go out on MIDI channel 0.
const CHANNEL: u8 = 0;

/// Serialize a sorted event list into a complete format-0 file.
pub(crate) fn write_file(events: &[TrackEvent], bpm: f64) -> Vec<u8> {
    let track = build_track(events, bpm);

    let mut out = Vec::with_capacity(14 + 8 + track.len());

    // Header chunk: 6 data bytes - format 0, one track, tick division
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&timing::TICKS_PER_QUARTER.to_be_bytes());

    // Track chunk: size field is the exact body length
    out.extend_from_slice(b"MTrk");
    out.extend_from_slice(&(track.len() as u32).to_be_bytes());
    out.extend_from_slice(&track);

    out
}

/// Build the track body: tempo meta, delta-timed channel events, end of
/// track.
fn build_track(events: &[TrackEvent], bpm: f64) -> Vec<u8> {
    let mut track = Vec::with_capacity(7 + events.len() * 4 + 4);

    // Tempo meta event at delta 0: FF 51 03 + 24-bit microseconds/quarter
    let micros = timing::micros_per_quarter(bpm);
    track.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03]);
    track.push((micros >> 16) as u8);
    track.push((micros >> 8) as u8);
    track.push(micros as u8);

    let mut last_tick = 0u32;
    for event in events {
        write_vlq(&mut track, event.tick - last_tick);
        last_tick = event.tick;

        let status = match event.kind {
            EventKind::NoteOn => 0x90 | CHANNEL,
            EventKind::NoteOff => 0x80 | CHANNEL,
        };
        track.push(status);
        track.push(event.pitch);
        track.push(event.velocity);
    }

    // End of track meta event
    track.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    track
}

/// Append a variable-length quantity: 7 bits per byte, most significant
/// group first, continuation bit set on every byte but the last.
fn write_vlq(buf: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut n = 0;
    loop {
        groups[n] = (value & 0x7F) as u8;
        value >>= 7;
        n += 1;
        if value == 0 {
            break;
        }
    }
    while n > 1 {
        n -= 1;
        buf.push(groups[n] | 0x80);
    }
    buf.push(groups[0]);
}
