//! The player: owns the output stream and at most one live session.
//!
//! `play` validates, tears down any previous session, pins every note
//! to the output clock, and arms a single completion timer for the
//! session's overall end. `stop` and the timer converge on the same
//! teardown path through the session state machine.

use crate::error::Result;
use crate::output::{self, StreamHandle};
use crate::session::{SessionEvent, SessionFsm, SessionState, Transition};
use crate::voice::{Voice, VoiceSet};
use crossbeam_channel::{after, bounded, select, Receiver, Sender};
use melodica_core::{note, timing, Note};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Live pattern player. One active session at a time; cheap to create,
/// touches no device until [`play`](Player::play).
#[derive(Default)]
pub struct Player {
    inner: Arc<Mutex<PlayerInner>>,
}

#[derive(Default)]
struct PlayerInner {
    fsm: SessionFsm,
    session: Option<ActiveSession>,
    /// Monotonic session counter; stale handles and timers compare
    /// against it so they can never touch a newer session.
    generation: u64,
}

struct ActiveSession {
    voices: Arc<VoiceSet>,
    generation: u64,
    /// Dropping this disarms the completion watcher.
    _cancel_tx: Sender<()>,
    /// Dropping this stops the output stream.
    _stream: StreamHandle,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a sequence for live playback.
    ///
    /// Any active session is stopped first; there is at most one per
    /// player. An empty sequence is a no-op that stays idle. On any
    /// device failure the player is left idle with no voices held.
    pub fn play(&self, notes: &[Note], bpm: f64) -> Result<SessionHandle> {
        note::validate_sequence(notes)?;
        timing::validate_bpm(bpm)?;

        let mut inner = self.inner.lock();
        inner.stop();

        if notes.is_empty() {
            return Ok(SessionHandle {
                inner: Arc::clone(&self.inner),
                generation: inner.generation,
            });
        }

        let (device, config) = output::acquire()?;
        let sample_rate = config.sample_rate().0 as f64;

        let voices: Vec<Voice> = notes
            .iter()
            .map(|n| Voice::from_note(n, bpm, sample_rate))
            .collect();
        let total_seconds = timing::beats_to_seconds(note::sequence_span(notes), bpm);
        let voice_set = Arc::new(VoiceSet::new(voices));

        let stream = output::start_stream(&device, config, Arc::clone(&voice_set))?;

        inner.generation += 1;
        let generation = inner.generation;
        inner.fsm.transition(SessionEvent::Schedule);

        let (cancel_tx, cancel_rx) = bounded::<()>(0);
        inner.session = Some(ActiveSession {
            voices: voice_set,
            generation,
            _cancel_tx: cancel_tx,
            _stream: stream,
        });

        spawn_completion_watcher(
            Arc::clone(&self.inner),
            generation,
            Duration::from_secs_f64(total_seconds),
            cancel_rx,
        );

        debug!(notes = notes.len(), bpm, total_seconds, "scheduled session");
        Ok(SessionHandle {
            inner: Arc::clone(&self.inner),
            generation,
        })
    }

    /// Stop the active session, if any. Idempotent and safe from every
    /// state.
    pub fn stop(&self) {
        self.inner.lock().stop();
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.inner.lock().state()
    }
}

impl PlayerInner {
    fn stop(&mut self) {
        self.finish(SessionEvent::Stop);
    }

    fn complete(&mut self) {
        self.finish(SessionEvent::Completed);
    }

    fn finish(&mut self, event: SessionEvent) {
        if matches!(self.fsm.transition(event), Transition::TearDown) {
            if let Some(session) = self.session.take() {
                session.voices.release_all();
                debug!(generation = session.generation, "released session");
            }
        }
    }

    fn state(&mut self) -> SessionState {
        // Fold the callback's first-buffer signal into the machine
        if let Some(session) = &self.session {
            if session.voices.is_audible() {
                self.fsm.transition(SessionEvent::ClockStarted);
            }
        }
        self.fsm.state()
    }
}

/// Arm the session's single completion timer.
///
/// Fires once when the last voice has run its course, unless the
/// session is stopped first (sender drop wakes the select immediately).
/// A stale timer firing after a newer `play` leaves that session alone.
fn spawn_completion_watcher(
    inner: Arc<Mutex<PlayerInner>>,
    generation: u64,
    total: Duration,
    cancel_rx: Receiver<()>,
) {
    std::thread::spawn(move || {
        select! {
            recv(after(total)) -> _ => {
                let mut inner = inner.lock();
                let current = inner.session.as_ref().map(|s| s.generation);
                if current == Some(generation) {
                    inner.complete();
                }
            }
            recv(cancel_rx) -> _ => {}
        }
    });
}

/// Handle to one scheduled playback session.
///
/// Stopping through a handle only affects the session it was issued
/// for; a handle from a superseded session is inert.
pub struct SessionHandle {
    inner: Arc<Mutex<PlayerInner>>,
    generation: u64,
}

impl SessionHandle {
    /// Stop this session if it is still the active one. Idempotent.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        let current = inner.session.as_ref().map(|s| s.generation);
        if current == Some(self.generation) {
            inner.stop();
        }
    }

    /// True once this session has been stopped, superseded, or has
    /// completed naturally.
    pub fn is_finished(&self) -> bool {
        self.inner
            .lock()
            .session
            .as_ref()
            .map_or(true, |s| s.generation != self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melodica_core::ValidationError;

    #[test]
    fn test_new_player_is_idle() {
        let player = Player::new();
        assert_eq!(player.state(), SessionState::Idle);
    }

    #[test]
    fn test_stop_without_play_is_safe() {
        let player = Player::new();
        player.stop();
        player.stop();
        assert_eq!(player.state(), SessionState::Idle);
    }

    #[test]
    fn test_play_validates_before_touching_any_device() {
        let player = Player::new();

        let err = player.play(&[Note::new(128, 0.0, 1.0, 100)], 120.0);
        assert!(matches!(
            err,
            Err(crate::PlaybackError::Invalid(ValidationError::Pitch { .. }))
        ));
        let err = player.play(&[Note::new(60, 0.0, 1.0, 100)], f64::NAN);
        assert!(matches!(
            err,
            Err(crate::PlaybackError::Invalid(ValidationError::Tempo(_)))
        ));

        assert_eq!(player.state(), SessionState::Idle);
    }

    #[test]
    fn test_empty_sequence_is_a_no_op() {
        let player = Player::new();
        let session = player.play(&[], 120.0).unwrap();

        assert!(session.is_finished());
        assert_eq!(player.state(), SessionState::Idle);
        session.stop(); // still safe
    }

    #[test]
    fn test_play_then_stop_returns_to_idle() {
        // A real output device may not exist in CI; a resource error is
        // an acceptable outcome, but the player must end idle either way
        let player = Player::new();
        match player.play(&[Note::new(60, 0.0, 0.25, 100)], 120.0) {
            Ok(session) => {
                session.stop();
                session.stop();
                assert!(session.is_finished());
            }
            Err(e) => assert!(!matches!(e, crate::PlaybackError::Invalid(_))),
        }
        player.stop();
        assert_eq!(player.state(), SessionState::Idle);
    }

    #[test]
    fn test_stale_handle_cannot_stop_newer_session() {
        let player = Player::new();
        let first = player.play(&[], 120.0).unwrap();

        match player.play(&[Note::new(60, 0.0, 4.0, 100)], 120.0) {
            Ok(second) => {
                // The stale handle is inert
                first.stop();
                if player.state() != SessionState::Idle {
                    assert!(!second.is_finished());
                }
                second.stop();
                assert_eq!(player.state(), SessionState::Idle);
            }
            Err(_) => {
                // No device available; the stale handle is still safe
                first.stop();
                assert_eq!(player.state(), SessionState::Idle);
            }
        }
    }
}
