//! Puzzle state machine
//!
//! Handlers in [`crate::game`] report a [`TetrisEvent`]; [`transition`]
//! maps it to the next state. A terminate request pre-empts every state
//! except START.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrisState {
    Start,
    Spawn,
    Input,
    Drop,
    Fix,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrisEvent {
    /// Session reset.
    Started,
    Spawned,
    /// The new piece has no room.
    Blocked,
    /// Shift, rotation or no input; fall through to the timer.
    Continue,
    /// One-cell soft drop from input.
    SoftDropped,
    /// The piece can fall no further.
    Landed,
    PauseEntered,
    /// Timer or held-down drop moved the piece.
    Fell,
    /// Timer still running, nothing queued.
    Waiting,
    /// Timer still running, but an action is queued.
    InputPending,
    /// Piece merged and lines cleared.
    Committed,
    /// Piece merged partly above the top.
    ToppedOut,
    Resumed,
    Terminated,
    Restart,
    Idle,
}

pub fn transition(state: TetrisState, event: TetrisEvent) -> TetrisState {
    use TetrisEvent as E;
    use TetrisState as S;

    match (state, event) {
        (S::Start, E::Terminated) => S::Start,
        (_, E::Terminated) => S::GameOver,
        (S::Start, E::Started) => S::Spawn,
        (S::Spawn, E::Spawned) => S::Input,
        (S::Spawn, E::Blocked) => S::GameOver,
        (S::Input, E::Continue) => S::Drop,
        (S::Input, E::SoftDropped) => S::Input,
        (S::Input | S::Drop, E::Landed) => S::Fix,
        (S::Input, E::PauseEntered) => S::Paused,
        (S::Drop, E::Fell | E::InputPending) => S::Input,
        (S::Fix, E::Committed) => S::Spawn,
        (S::Fix, E::ToppedOut) => S::GameOver,
        (S::Paused, E::Resumed) => S::Input,
        (S::GameOver, E::Restart) => S::Start,
        (state, _) => state,
    }
}
