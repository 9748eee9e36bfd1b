//! # Melodica Export
//!
//! Offline rendering for the melodica pattern engine: mixes a note
//! sequence into a mono PCM buffer with an explicit, deterministic
//! sample loop, then packages it as a 16-bit WAV file.
//!
//! Rendering is pure CPU work with no real-time constraints; run it on
//! a worker thread via [`render_to_wav_background`] when live playback
//! must stay responsive.
//!
//! # Example
//! ```
//! use melodica_core::Note;
//! use melodica_export::{render_to_wav, RenderOptions};
//!
//! let notes = [Note::new(60, 0.0, 1.0, 100)];
//! let bytes = render_to_wav(&notes, 120.0, &RenderOptions::default()).unwrap();
//! assert_eq!(&bytes[0..4], b"RIFF");
//! ```

mod error;
mod handle;
mod mixer;
mod options;
mod wav;

pub use error::{RenderError, Result};
pub use handle::{RenderHandle, RenderStatus};
pub use mixer::{render_to_pcm, PcmBuffer};
pub use options::RenderOptions;
pub use wav::encode_wav;

use melodica_core::Note;

/// Render a note sequence straight to WAV file bytes.
///
/// Deterministic: identical inputs produce byte-identical output.
pub fn render_to_wav(notes: &[Note], bpm: f64, options: &RenderOptions) -> Result<Vec<u8>> {
    let pcm = render_to_pcm(notes, bpm, options)?;
    encode_wav(&pcm)
}

/// Render on a background thread, returning a cancellable handle.
///
/// The notes are moved into the worker; cancel via
/// [`RenderHandle::cancel`] and collect the bytes with
/// [`RenderHandle::wait`].
pub fn render_to_wav_background(
    notes: Vec<Note>,
    bpm: f64,
    options: RenderOptions,
) -> RenderHandle {
    RenderHandle::spawn(notes, bpm, options)
}
