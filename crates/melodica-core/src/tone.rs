//! Tone math shared by the offline mixer and the live scheduler.
//!
//! One note is one sine oscillator shaped by a linear attack/release
//! envelope. Both rendering paths call into these functions and nothing
//! else, so a file render and a live audition of the same sequence
//! sound identical.

/// Attack ramp length in seconds.
pub const ATTACK_SECONDS: f64 = 0.01;

/// Gain at full velocity. Kept well under 1.0 so a typical chord sums
/// below full scale.
pub const PEAK_GAIN: f64 = 0.3;

/// Oscillator frequency in Hz for a MIDI note number
/// (equal temperament, A4 = 440 Hz).
pub fn note_frequency(pitch: u8) -> f64 {
    440.0 * 2f64.powf((pitch as f64 - 69.0) / 12.0)
}

/// Amplitude envelope gain at `t` seconds after note start.
///
/// Linear ramp from 0 to the velocity-scaled peak over
/// [`ATTACK_SECONDS`], then a linear release from that peak back to 0
/// spanning the remainder of the note. The envelope reaches 0 exactly at
/// `duration`; outside `[0, duration]` the gain is 0. Notes shorter than
/// the attack ramp spend their whole duration in the attack.
pub fn envelope_gain(velocity: u8, t: f64, duration: f64) -> f32 {
    if t < 0.0 || t >= duration {
        return 0.0;
    }

    let peak = velocity as f64 / 127.0 * PEAK_GAIN;
    let attack = ATTACK_SECONDS.min(duration);
    if t < attack {
        return (peak * t / attack) as f32;
    }

    let release = duration - attack;
    (peak * (duration - t) / release) as f32
}
