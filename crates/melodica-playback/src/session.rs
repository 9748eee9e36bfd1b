//! Playback session state machine.
//!
//! Pure state transitions with no device or clock attached, so the
//! play/stop lifecycle is testable without output hardware. The player
//! interprets [`Transition::TearDown`] as "release every voice and
//! disarm the completion timer".

/// Lifecycle of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session; the output device is not held.
    #[default]
    Idle,
    /// Voices are armed but the output clock has not produced audio yet.
    Scheduled,
    /// The output clock is running and voices are sounding.
    Playing,
}

/// Events driving the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    /// A new session was armed. The player stops any previous session
    /// before raising this, so it is accepted from every state.
    Schedule,
    /// The output callback produced its first buffer.
    ClockStarted,
    /// The completion timer fired: every voice has run its course.
    Completed,
    /// Explicit stop request.
    Stop,
}

/// Result of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Nothing to do (e.g. stop while already idle).
    None,
    /// State changed, no resources affected.
    Entered(SessionState),
    /// State fell back to idle; the caller must release all voices.
    TearDown,
}

/// The session state machine.
#[derive(Debug, Default)]
pub(crate) struct SessionFsm {
    state: SessionState,
}

impl SessionFsm {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn transition(&mut self, event: SessionEvent) -> Transition {
        use SessionEvent::*;

        match event {
            Schedule => {
                self.state = SessionState::Scheduled;
                Transition::Entered(SessionState::Scheduled)
            }

            ClockStarted => match self.state {
                SessionState::Scheduled => {
                    self.state = SessionState::Playing;
                    Transition::Entered(SessionState::Playing)
                }
                // A late first buffer after stop, or a repeat notification
                SessionState::Idle | SessionState::Playing => Transition::None,
            },

            Stop | Completed => match self.state {
                SessionState::Idle => Transition::None,
                SessionState::Scheduled | SessionState::Playing => {
                    self.state = SessionState::Idle;
                    Transition::TearDown
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_lifecycle() {
        let mut fsm = SessionFsm::new();
        assert_eq!(fsm.state(), SessionState::Idle);

        assert_eq!(
            fsm.transition(SessionEvent::Schedule),
            Transition::Entered(SessionState::Scheduled)
        );
        assert_eq!(
            fsm.transition(SessionEvent::ClockStarted),
            Transition::Entered(SessionState::Playing)
        );
        assert_eq!(fsm.transition(SessionEvent::Completed), Transition::TearDown);
        assert_eq!(fsm.state(), SessionState::Idle);
    }

    #[test]
    fn test_stop_is_idempotent_from_every_state() {
        let mut fsm = SessionFsm::new();

        // Stop with no prior play
        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::None);
        assert_eq!(fsm.state(), SessionState::Idle);

        // Stop while scheduled, then again
        fsm.transition(SessionEvent::Schedule);
        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::TearDown);
        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::None);

        // Stop while playing, then again
        fsm.transition(SessionEvent::Schedule);
        fsm.transition(SessionEvent::ClockStarted);
        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::TearDown);
        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::None);
        assert_eq!(fsm.state(), SessionState::Idle);
    }

    #[test]
    fn test_stop_after_natural_completion() {
        let mut fsm = SessionFsm::new();
        fsm.transition(SessionEvent::Schedule);
        fsm.transition(SessionEvent::ClockStarted);
        fsm.transition(SessionEvent::Completed);

        assert_eq!(fsm.transition(SessionEvent::Stop), Transition::None);
        assert_eq!(fsm.state(), SessionState::Idle);
    }

    #[test]
    fn test_clock_started_only_advances_scheduled() {
        let mut fsm = SessionFsm::new();
        assert_eq!(fsm.transition(SessionEvent::ClockStarted), Transition::None);
        assert_eq!(fsm.state(), SessionState::Idle);

        fsm.transition(SessionEvent::Schedule);
        fsm.transition(SessionEvent::ClockStarted);
        // Repeat notification while already playing
        assert_eq!(fsm.transition(SessionEvent::ClockStarted), Transition::None);
        assert_eq!(fsm.state(), SessionState::Playing);
    }

    #[test]
    fn test_completion_while_still_scheduled() {
        // A zero-length pattern can complete before the clock ever runs
        let mut fsm = SessionFsm::new();
        fsm.transition(SessionEvent::Schedule);
        assert_eq!(fsm.transition(SessionEvent::Completed), Transition::TearDown);
        assert_eq!(fsm.state(), SessionState::Idle);
    }
}
