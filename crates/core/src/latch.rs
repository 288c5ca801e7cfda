//! Input latch - the mailbox between the host and an engine
//!
//! Holds at most one pending action. A newer submission replaces an
//! unconsumed older one, so a slow consumer sees only the latest intent.
//! The held flag and the terminate request live beside the slot and are not
//! cleared by [`InputLatch::take_one`].

use crate::types::UserAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLatch {
    pending: Option<UserAction>,
    held: bool,
    terminate: bool,
    /// The action whose `held` flag is recorded.
    held_action: UserAction,
}

impl InputLatch {
    pub fn new(held_action: UserAction) -> Self {
        Self {
            pending: None,
            held: false,
            terminate: false,
            held_action,
        }
    }

    /// Store `action`, replacing any unconsumed one.
    pub fn submit(&mut self, action: UserAction, held: bool) {
        if action == self.held_action {
            self.held = held;
        }
        if action == UserAction::Terminate {
            self.terminate = true;
        }
        self.pending = Some(action);
    }

    /// Consume the pending action, if any.
    pub fn take_one(&mut self) -> Option<UserAction> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// One-shot read of the terminate request.
    ///
    /// A `Terminate` still sitting in the slot is dropped as well so the
    /// request is seen exactly once.
    pub fn take_terminate_once(&mut self) -> bool {
        if !self.terminate {
            return false;
        }
        self.terminate = false;
        if self.pending == Some(UserAction::Terminate) {
            self.pending = None;
        }
        true
    }

    pub fn terminate_pending(&self) -> bool {
        self.terminate
    }

    pub fn request_terminate(&mut self) {
        self.terminate = true;
    }

    pub fn held_state(&self) -> bool {
        self.held
    }

    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.held = false;
        self.terminate = false;
    }
}
