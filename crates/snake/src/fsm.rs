//! Snake state machine
//!
//! Handlers in [`crate::game`] do the work of a state and report what
//! happened as a [`SnakeEvent`]; [`transition`] alone decides where that
//! leads.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeState {
    Start,
    Input,
    Drop,
    Fix,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeEvent {
    /// Fresh session laid out.
    Started,
    /// Input read; play continues.
    Continue,
    /// Input read while the pause flag is set.
    PauseEntered,
    /// Terminate request or an already lost game.
    Ended,
    /// Tick counter still running.
    Waiting,
    /// Tick elapsed (or an accelerate click forced it).
    Ready,
    /// Head advanced without collision.
    Moved,
    Collided,
    /// Nothing to do this poll.
    Idle,
    /// Pause flag cleared while paused.
    Resumed,
    /// Game-over flag cleared while over.
    Restart,
}

pub fn transition(state: SnakeState, event: SnakeEvent) -> SnakeState {
    use SnakeEvent as E;
    use SnakeState as S;

    match (state, event) {
        (S::Start, E::Started) => S::Input,
        (S::Input, E::PauseEntered) => S::Paused,
        (S::Input | S::Paused, E::Ended) => S::GameOver,
        (S::Input, E::Continue) => S::Drop,
        (S::Drop, E::Ready) => S::Fix,
        (S::Fix, E::Moved) => S::Input,
        (S::Fix, E::Collided) => S::GameOver,
        (S::Paused, E::Resumed) => S::Input,
        (S::GameOver, E::Restart) => S::Start,
        (state, _) => state,
    }
}
