//! Offline mixer.
//!
//! Sums every note's sine-plus-envelope contribution into one mono
//! buffer with a plain sample loop. No limiter is applied; dense chords
//! may sum past full scale, which the WAV encoder clamps (and reports)
//! at quantization time. The measured peak travels with the buffer so
//! callers can observe clipping without rescanning.

use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use melodica_core::{note, timing, tone, Note};
use std::f64::consts::TAU;

/// Rendered mono PCM audio.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    peak: f32,
}

impl PcmBuffer {
    /// The samples, nominally in [-1, 1] (unclamped mixing may exceed).
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value in the buffer.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// True when the mix summed past full scale and 16-bit quantization
    /// will clamp.
    pub fn clipped(&self) -> bool {
        self.peak > 1.0
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Mix a note sequence into a mono PCM buffer.
///
/// Buffer length is `ceil(sample_rate * (span_seconds + tail_seconds))`.
/// Each note adds `sin(2pi f t) * envelope(t)` over the sample indices
/// that fall inside its lifetime; overlapping notes sum. The loop is
/// fully deterministic: no randomness, no wall clock, fixed iteration
/// order.
pub fn render_to_pcm(notes: &[Note], bpm: f64, options: &RenderOptions) -> Result<PcmBuffer> {
    note::validate_sequence(notes)?;
    timing::validate_bpm(bpm)?;
    if notes.is_empty() && options.require_notes {
        return Err(RenderError::EmptyInput);
    }

    let sample_rate = options.sample_rate as f64;
    let total_seconds = timing::beats_to_seconds(note::sequence_span(notes), bpm)
        + options.tail_seconds;
    let total_samples = (sample_rate * total_seconds).ceil() as usize;
    let mut samples = vec![0.0f32; total_samples];

    for note in notes {
        mix_note(note, bpm, sample_rate, &mut samples);
    }

    let peak = samples.iter().fold(0.0f32, |max, s| max.max(s.abs()));
    Ok(PcmBuffer {
        samples,
        sample_rate: options.sample_rate,
        peak,
    })
}

/// Add one note's contribution in place.
fn mix_note(note: &Note, bpm: f64, sample_rate: f64, samples: &mut [f32]) {
    let start_seconds = timing::beats_to_seconds(note.start, bpm);
    let duration_seconds = timing::beats_to_seconds(note.duration, bpm);
    let frequency = tone::note_frequency(note.pitch);

    let first = (start_seconds * sample_rate).ceil() as usize;
    let last = ((start_seconds + duration_seconds) * sample_rate).floor() as usize;
    let last = last.min(samples.len().saturating_sub(1));
    if first > last || samples.is_empty() {
        return;
    }

    for (i, sample) in samples[first..=last].iter_mut().enumerate() {
        let t = (first + i) as f64 / sample_rate - start_seconds;
        let gain = tone::envelope_gain(note.velocity, t, duration_seconds);
        *sample += (TAU * frequency * t).sin() as f32 * gain;
    }
}
