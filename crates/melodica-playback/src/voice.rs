//! Live voices.
//!
//! A voice is one sounding note pinned to the output clock: frequency,
//! velocity, and a start/end position in samples. The whole session is
//! one uniform [`VoiceSet`]; stop-and-release is a single operation over
//! it regardless of how many voices are sounding or already finished.

use melodica_core::{timing, tone, Note};
use parking_lot::Mutex;
use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One scheduled voice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Voice {
    frequency: f64,
    velocity: u8,
    start_sample: u64,
    end_sample: u64,
    duration_seconds: f64,
}

impl Voice {
    /// Pin a note to the output clock, sample positions relative to the
    /// session start.
    pub(crate) fn from_note(note: &Note, bpm: f64, sample_rate: f64) -> Self {
        let start_seconds = timing::beats_to_seconds(note.start, bpm);
        let duration_seconds = timing::beats_to_seconds(note.duration, bpm);

        Self {
            frequency: tone::note_frequency(note.pitch),
            velocity: note.velocity,
            start_sample: (start_seconds * sample_rate).round() as u64,
            end_sample: ((start_seconds + duration_seconds) * sample_rate).round() as u64,
            duration_seconds,
        }
    }

    /// Add this voice's contribution to a mono frame buffer starting at
    /// clock position `clock`. Samples outside the voice's lifetime are
    /// untouched.
    pub(crate) fn mix(&self, clock: u64, out: &mut [f32], sample_rate: f64) {
        let lo = self.start_sample.max(clock);
        let hi = self.end_sample.min(clock + out.len() as u64);

        for position in lo..hi {
            let t = (position - self.start_sample) as f64 / sample_rate;
            let gain = tone::envelope_gain(self.velocity, t, self.duration_seconds);
            out[(position - clock) as usize] += (TAU * self.frequency * t).sin() as f32 * gain;
        }
    }
}

/// The session's set of scheduled voices, shared between the player and
/// the output callback.
#[derive(Debug, Default)]
pub(crate) struct VoiceSet {
    voices: Mutex<Vec<Voice>>,
    clock: AtomicU64,
    audible: AtomicBool,
}

impl VoiceSet {
    pub(crate) fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices: Mutex::new(voices),
            clock: AtomicU64::new(0),
            audible: AtomicBool::new(false),
        }
    }

    /// Render one mono frame buffer and advance the clock.
    ///
    /// Called from the output callback. The clock advances even when
    /// the voice lock is contended (the frame goes out silent), so
    /// scheduled positions stay honest.
    pub(crate) fn render(&self, out: &mut [f32], sample_rate: f64) {
        out.fill(0.0);
        let clock = self.clock.fetch_add(out.len() as u64, Ordering::AcqRel);
        self.audible.store(true, Ordering::Release);

        let Some(voices) = self.voices.try_lock() else {
            return;
        };
        for voice in voices.iter() {
            voice.mix(clock, out, sample_rate);
        }
    }

    /// Uniform stop-and-release: silences every voice, sounding or
    /// already finished.
    pub(crate) fn release_all(&self) {
        self.voices.lock().clear();
    }

    /// Whether the output callback has produced at least one buffer.
    pub(crate) fn is_audible(&self) -> bool {
        self.audible.load(Ordering::Acquire)
    }
}
