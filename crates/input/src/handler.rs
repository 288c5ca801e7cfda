//! Hold tracking for terminal environments.
//!
//! Many terminals never emit key-release events; a held key only shows up
//! as a stream of repeated presses. [`HoldTracker`] remembers when each
//! hold-capable action was last pressed and synthesizes the release once
//! the presses stop for longer than the timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::UserAction;

/// Actions whose `held` flag the engines care about.
const HOLD_ACTIONS: [UserAction; 2] = [UserAction::Action, UserAction::Down];

// Long enough to bridge the gap between auto-repeat presses.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct HoldTracker {
    held: ArrayVec<(UserAction, Instant), 2>,
    release_timeout: Duration,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Record a mapped key event observed at `now`.
    pub fn observe(&mut self, action: UserAction, held: bool, now: Instant) {
        if !HOLD_ACTIONS.contains(&action) {
            return;
        }
        let slot = self.held.iter().position(|(a, _)| *a == action);
        match (slot, held) {
            (Some(i), true) => self.held[i].1 = now,
            (None, true) => {
                let _ = self.held.try_push((action, now));
            }
            (Some(i), false) => {
                self.held.remove(i);
            }
            (None, false) => {}
        }
    }

    pub fn is_held(&self, action: UserAction) -> bool {
        self.held.iter().any(|(a, _)| *a == action)
    }

    /// Releases for every hold whose last press is older than the timeout.
    pub fn expire(&mut self, now: Instant) -> ArrayVec<(UserAction, bool), 2> {
        let mut released = ArrayVec::new();
        let timeout = self.release_timeout;
        self.held.retain(|(action, pressed)| {
            if now.saturating_duration_since(*pressed) > timeout {
                released.push((*action, false));
                false
            } else {
                true
            }
        });
        released
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for HoldTracker {
    fn default() -> Self {
        Self::new()
    }
}
