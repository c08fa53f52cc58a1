//! Readout state machine and shared status.
//!
//! [`ReadoutState`] drives the orchestrator.  Front-ends read it through
//! [`SharedState`] to decide whether a "read" button is enabled.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<ReadoutStatus>>`, cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// ReadoutState
// ---------------------------------------------------------------------------

/// States of one readout.
///
/// ```text
/// Idle ──Speak──▶ Synthesizing ──audio ready──▶ Playing ──finished──▶ Idle
/// Synthesizing / Playing ──Stop or error──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadoutState {
    /// Nothing is being read.
    #[default]
    Idle,

    /// Waiting for the synthesis engine to return audio.
    Synthesizing,

    /// Audio has been handed to the player.
    Playing,
}

impl ReadoutState {
    /// Returns `true` while a readout is in flight.
    ///
    /// ```
    /// use yomiage::pipeline::ReadoutState;
    ///
    /// assert!(!ReadoutState::Idle.is_busy());
    /// assert!(ReadoutState::Synthesizing.is_busy());
    /// assert!(ReadoutState::Playing.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, ReadoutState::Synthesizing | ReadoutState::Playing)
    }

    /// A short human-readable label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            ReadoutState::Idle => "Idle",
            ReadoutState::Synthesizing => "Synthesizing",
            ReadoutState::Playing => "Playing",
        }
    }
}

// ---------------------------------------------------------------------------
// ReadoutStatus
// ---------------------------------------------------------------------------

/// Everything a front-end needs to show about the readout.
#[derive(Debug, Clone, Default)]
pub struct ReadoutStatus {
    /// Current phase.
    pub state: ReadoutState,

    /// Phrase of the current (or most recent) readout.
    pub text: Option<String>,

    /// Message of the last failed readout.  Cleared when a new one starts.
    pub last_error: Option<String>,

    /// Readouts that played to the end.
    pub completed: u64,
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`ReadoutStatus`].
///
/// Lock for a short critical section; do **not** hold the lock across
/// `.await` points.
pub type SharedState = Arc<Mutex<ReadoutStatus>>;

/// Construct a new [`SharedState`] in the `Idle` state.
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(ReadoutStatus::default()))
}

/// Lock `state`, recovering the data if a previous holder panicked.
pub fn lock_status(state: &SharedState) -> MutexGuard<'_, ReadoutStatus> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_is_not_busy() {
        assert!(!ReadoutState::Idle.is_busy());
        assert!(ReadoutState::Synthesizing.is_busy());
        assert!(ReadoutState::Playing.is_busy());
    }

    #[test]
    fn labels() {
        assert_eq!(ReadoutState::Idle.label(), "Idle");
        assert_eq!(ReadoutState::Synthesizing.label(), "Synthesizing");
        assert_eq!(ReadoutState::Playing.label(), "Playing");
    }

    #[test]
    fn default_status_is_idle_and_clean() {
        let status = ReadoutStatus::default();
        assert_eq!(status.state, ReadoutState::Idle);
        assert!(status.text.is_none());
        assert!(status.last_error.is_none());
        assert_eq!(status.completed, 0);
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state();
        let state2 = Arc::clone(&state);

        lock_status(&state).state = ReadoutState::Playing;
        assert_eq!(lock_status(&state2).state, ReadoutState::Playing);
    }
}
