//! The polling interface shared by both games.
//!
//! A host loop calls [`Engine::submit_input`] whenever the user acts and
//! [`Engine::advance_and_snapshot`] once per frame. Each advance performs
//! exactly one state-machine transition.

use crate::types::{GameInfo, GameKind, UserAction};

pub trait Engine: Send {
    fn kind(&self) -> GameKind;

    /// Latch an action for the next poll.
    fn submit_input(&mut self, action: UserAction, held: bool);

    /// Run one state-machine transition.
    fn step(&mut self);

    /// Write the current view into `out`.
    fn snapshot_into(&self, out: &mut GameInfo);

    /// True while the state machine sits in its game-over state.
    fn is_game_over(&self) -> bool;

    /// Edge-triggered: true once per terminate request or game over.
    fn take_terminate_once(&mut self) -> bool;

    fn advance_and_snapshot(&mut self) -> GameInfo {
        self.step();
        let mut info = GameInfo::default();
        self.snapshot_into(&mut info);
        info
    }
}

/// Reports a level-triggered condition once per rising edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    reported: bool,
}

impl EdgeLatch {
    pub fn read(&mut self, condition: bool) -> bool {
        if !condition {
            self.reported = false;
            return false;
        }
        let first = !self.reported;
        self.reported = true;
        first
    }
}
