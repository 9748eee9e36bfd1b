//! Background render handle with cancellation.
//!
//! The render runs on its own thread; cancellation is checked at stage
//! boundaries (before the mix, before the encode), so a cancelled job
//! yields [`RenderError::Cancelled`] and never a truncated byte
//! sequence. A cancel that loses the race against completion is
//! harmless: the finished bytes are complete.

use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::{mixer, wav};
use crossbeam_channel::{bounded, Sender};
use melodica_core::Note;
use std::thread::JoinHandle;

/// Status of a background render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Running,
    Finished,
}

/// Handle to a render running on a worker thread.
pub struct RenderHandle {
    cancel_tx: Sender<()>,
    thread: Option<JoinHandle<Result<Vec<u8>>>>,
}

impl RenderHandle {
    pub(crate) fn spawn(notes: Vec<Note>, bpm: f64, options: RenderOptions) -> Self {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);

        let thread = std::thread::spawn(move || {
            let cancelled = || cancel_rx.try_recv().is_ok();

            if cancelled() {
                return Err(RenderError::Cancelled);
            }
            let pcm = mixer::render_to_pcm(&notes, bpm, &options)?;
            if cancelled() {
                return Err(RenderError::Cancelled);
            }
            wav::encode_wav(&pcm)
        });

        Self {
            cancel_tx,
            thread: Some(thread),
        }
    }

    /// Request cancellation (non-blocking, safe to call repeatedly).
    pub fn cancel(&self) {
        let _ = self.cancel_tx.try_send(());
    }

    /// Current status (non-blocking).
    pub fn status(&self) -> RenderStatus {
        match &self.thread {
            Some(thread) if !thread.is_finished() => RenderStatus::Running,
            _ => RenderStatus::Finished,
        }
    }

    /// Block until the render finishes and take the result.
    pub fn wait(mut self) -> Result<Vec<u8>> {
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .unwrap_or_else(|_| Err(RenderError::Render("render thread panicked".into()))),
            None => Err(RenderError::Render("render already collected".into())),
        }
    }
}
