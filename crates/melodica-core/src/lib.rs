//! # Melodica Core
//!
//! Shared data contract and pure math for the melodica pattern engine.
//!
//! Every other melodica crate builds on this one:
//! - [`Note`] - the immutable note event exchanged with the upstream
//!   pattern generator
//! - [`timing`] - beats <-> seconds <-> MIDI ticks conversion
//! - [`tone`] - frequency and amplitude-envelope math, shared verbatim
//!   by the offline mixer and the live scheduler
//!
//! # Example
//! ```
//! use melodica_core::{validate_sequence, Note};
//!
//! let pattern = vec![
//!     Note::new(60, 0.0, 1.0, 100), // middle C, one beat
//!     Note::new(64, 1.0, 1.0, 100),
//! ];
//! assert!(validate_sequence(&pattern).is_ok());
//! ```

pub mod error;
pub mod note;
pub mod timing;
pub mod tone;

pub use error::ValidationError;
pub use note::{sequence_span, validate_sequence, Note};
