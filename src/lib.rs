//! # Melodica
//!
//! Note-event-to-sound pipeline: turn an abstract sequence of musical
//! note events (pitch/start/duration/velocity in beats at a tempo) into
//! a Standard MIDI File, a rendered WAV file, or live audio.
//!
//! ## Architecture
//!
//! Melodica is an umbrella crate over small, focused subsystems:
//! - **melodica-core** - note model, timing conversion, tone math
//! - **melodica-midi** - binary Standard MIDI File serializer
//! - **melodica-export** - offline mixer and WAV encoder
//! - **melodica-playback** - live audition over the system output device
//!
//! The file-producing paths are pure, deterministic functions; only
//! playback touches a real device. Both sound paths share the exact
//! tone math in `melodica-core`, so a live audition and an exported WAV
//! of the same sequence are interchangeable.
//!
//! ## Quick start
//!
//! ```no_run
//! use melodica::prelude::*;
//!
//! let pattern = vec![
//!     Note::new(60, 0.0, 1.0, 100),
//!     Note::new(64, 1.0, 1.0, 100),
//!     Note::new(67, 2.0, 2.0, 110),
//! ];
//!
//! // File artifacts
//! let midi_bytes = encode_midi(&pattern, 120.0)?;
//! let wav_bytes = render_to_wav(&pattern, 120.0, &RenderOptions::default())?;
//!
//! // Live audition
//! let player = Player::new();
//! let session = player.play(&pattern, 120.0)?;
//! // ...
//! session.stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature flags
//!
//! - `playback` (default) - live audition via `cpal`; disable for
//!   headless file rendering only

/// Re-export of melodica-core for direct access
pub use melodica_core as core;

// Note model and validation
pub use melodica_core::{sequence_span, validate_sequence, Note, ValidationError};

// Timing and tone math
pub use melodica_core::{timing, tone};

// MIDI file serialization
pub use melodica_midi::{encode_midi, MidiEncodeError};

// Offline rendering and WAV export
pub use melodica_export::{
    encode_wav, render_to_pcm, render_to_wav, render_to_wav_background, PcmBuffer, RenderError,
    RenderHandle, RenderOptions, RenderStatus,
};

// Live playback
#[cfg(feature = "playback")]
pub use melodica_playback::{PlaybackError, Player, SessionHandle, SessionState};

/// Convenient imports for the common paths.
pub mod prelude {
    pub use crate::{
        encode_midi, render_to_wav, render_to_wav_background, Note, RenderOptions,
        ValidationError,
    };

    #[cfg(feature = "playback")]
    pub use crate::{Player, SessionHandle, SessionState};
}
