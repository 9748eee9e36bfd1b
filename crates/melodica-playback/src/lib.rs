//! # Melodica Playback
//!
//! Live audition of note sequences: schedules one voice per note
//! against the system output clock and plays them through `cpal`. File
//! rendering lives in `melodica-export`; the two share only the pure
//! tone math in `melodica-core`, so what you hear is what you export.
//!
//! A [`Player`] owns at most one live session at a time. `play` while a
//! session is active tears the old one down first; `stop` is idempotent
//! and safe from any state, including before any `play` and after
//! natural completion.
//!
//! # Example
//! ```no_run
//! use melodica_core::Note;
//! use melodica_playback::Player;
//!
//! let player = Player::new();
//! let session = player.play(&[Note::new(60, 0.0, 1.0, 100)], 120.0)?;
//! // ... later, from any state:
//! session.stop();
//! # Ok::<(), melodica_playback::PlaybackError>(())
//! ```

mod error;
mod output;
mod player;
mod session;
mod voice;

pub use error::{PlaybackError, Result};
pub use player::{Player, SessionHandle};
pub use session::SessionState;
