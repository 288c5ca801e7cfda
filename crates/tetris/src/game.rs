//! TetrisGame - the falling-block engine behind the polling interface

use log::debug;

use crate::bag::Bag;
use crate::board::Board;
use crate::fsm::{transition, TetrisEvent, TetrisState};
use crate::pieces::{Piece, PieceKind};
use crate::rules::{can_move, commit, hard_drop, spawn_fits, try_rotate, try_shift};
use crate::scoring::{tick_limit_for_level, Progress};
use crate::types::{GameInfo, GameKind, UserAction, CELL_FILLED};
use brick_game_core::{speed_ms, Config, EdgeLatch, Engine, HighScore, InputLatch, ScoreStore};

pub struct TetrisGame {
    state: TetrisState,
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    bag: Bag,
    progress: Progress,
    /// Polls counted toward the next gravity drop.
    tick: u32,
    latch: InputLatch,
    paused: bool,
    high_score: HighScore,
    terminate_edge: EdgeLatch,
}

impl TetrisGame {
    pub fn new(seed: u32, mut high_score: HighScore) -> Self {
        high_score.load_once();
        let mut bag = Bag::new(seed);
        let next = bag.draw();
        Self {
            state: TetrisState::Start,
            board: Board::new(),
            active: None,
            next,
            bag,
            progress: Progress::default(),
            tick: 0,
            latch: InputLatch::new(UserAction::Down),
            paused: false,
            high_score,
            terminate_edge: EdgeLatch::default(),
        }
    }

    pub fn with_store(seed: u32, store: impl ScoreStore + 'static) -> Self {
        Self::new(seed, HighScore::new(store))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.seed_or_clock(),
            HighScore::from_path(config.score_file(GameKind::Tetris)),
        )
    }

    pub fn state(&self) -> TetrisState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn tick_limit(&self) -> u32 {
        self.progress.tick_limit
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn run_state(&mut self) -> TetrisEvent {
        match self.state {
            TetrisState::Start => self.start_session(),
            TetrisState::Spawn => self.spawn_next(),
            TetrisState::Input => self.read_input(),
            TetrisState::Drop => self.apply_gravity(),
            TetrisState::Fix => self.fix_piece(),
            TetrisState::Paused => match self.latch.take_one() {
                Some(UserAction::Pause) => {
                    self.paused = false;
                    TetrisEvent::Resumed
                }
                Some(UserAction::Terminate) => TetrisEvent::Terminated,
                _ => TetrisEvent::Idle,
            },
            TetrisState::GameOver => match self.latch.take_one() {
                Some(UserAction::Start) => TetrisEvent::Restart,
                _ => TetrisEvent::Idle,
            },
        }
    }

    fn start_session(&mut self) -> TetrisEvent {
        self.latch.reset();
        self.board.clear();
        self.active = None;
        self.progress.reset();
        self.tick = 0;
        self.paused = false;
        self.high_score.reload();
        debug!("tetris session started, next {:?}", self.next);
        TetrisEvent::Started
    }

    fn spawn_next(&mut self) -> TetrisEvent {
        let piece = Piece::spawn(self.next);
        self.next = self.bag.draw();
        self.active = Some(piece);
        if spawn_fits(&self.board, &piece) {
            TetrisEvent::Spawned
        } else {
            debug!("tetris spawn blocked at score {}", self.progress.score);
            TetrisEvent::Blocked
        }
    }

    fn read_input(&mut self) -> TetrisEvent {
        let Some(piece) = self.active.as_mut() else {
            return TetrisEvent::Landed;
        };
        match self.latch.take_one() {
            Some(UserAction::Left) => {
                try_shift(&self.board, piece, -1, 0);
                TetrisEvent::Continue
            }
            Some(UserAction::Right) => {
                try_shift(&self.board, piece, 1, 0);
                TetrisEvent::Continue
            }
            Some(UserAction::Up) => {
                try_rotate(&self.board, piece);
                TetrisEvent::Continue
            }
            Some(UserAction::Action) => {
                hard_drop(&self.board, piece);
                TetrisEvent::Landed
            }
            Some(UserAction::Down) => {
                if try_shift(&self.board, piece, 0, 1) {
                    TetrisEvent::SoftDropped
                } else {
                    TetrisEvent::Landed
                }
            }
            Some(UserAction::Pause) => {
                self.paused = true;
                TetrisEvent::PauseEntered
            }
            Some(UserAction::Terminate) => TetrisEvent::Terminated,
            Some(UserAction::Start) | None => TetrisEvent::Continue,
        }
    }

    /// Count one poll toward gravity.
    ///
    /// The limit is re-synced to the level curve first, so the line-driven
    /// decrement only lasts until the next check.
    fn tick_ready(&mut self) -> bool {
        let target = tick_limit_for_level(self.progress.level);
        if self.progress.tick_limit != target {
            self.progress.tick_limit = target;
        }
        self.tick += 1;
        if self.tick > self.progress.tick_limit {
            self.tick = 0;
            true
        } else {
            false
        }
    }

    fn apply_gravity(&mut self) -> TetrisEvent {
        if self.latch.held_state() || self.tick_ready() {
            let Some(piece) = self.active.as_mut() else {
                return TetrisEvent::Landed;
            };
            if can_move(&self.board, piece, 0, 1) {
                piece.y += 1;
                TetrisEvent::Fell
            } else {
                TetrisEvent::Landed
            }
        } else if self.latch.has_pending() {
            TetrisEvent::InputPending
        } else {
            TetrisEvent::Waiting
        }
    }

    fn fix_piece(&mut self) -> TetrisEvent {
        let Some(piece) = self.active.take() else {
            return TetrisEvent::Committed;
        };
        if !commit(&mut self.board, &piece) {
            debug!("tetris topped out at score {}", self.progress.score);
            return TetrisEvent::ToppedOut;
        }

        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            let points = self.progress.apply_clear(cleared);
            debug!("cleared {cleared} lines for {points}");
            self.high_score.observe(self.progress.score);
        }
        self.tick = 0;
        TetrisEvent::Committed
    }
}

impl Engine for TetrisGame {
    fn kind(&self) -> GameKind {
        GameKind::Tetris
    }

    fn submit_input(&mut self, action: UserAction, held: bool) {
        match (action, held) {
            // Releasing the hard-drop key is not an action.
            (UserAction::Action, false) => {}
            // Releasing Down only ends the fast drop.
            (UserAction::Down, false) => self.latch.set_held(false),
            _ => self.latch.submit(action, held),
        }
    }

    fn step(&mut self) {
        let event = if self.state != TetrisState::Start && self.latch.take_terminate_once() {
            TetrisEvent::Terminated
        } else {
            self.run_state()
        };
        self.state = transition(self.state, event);
    }

    fn snapshot_into(&self, out: &mut GameInfo) {
        out.clear();
        self.board.write_field(&mut out.field);
        if let Some(piece) = &self.active {
            for (x, y) in piece.cells() {
                if x >= 0 && y >= 0 {
                    if let Some(cell) = out
                        .field
                        .get_mut(y as usize)
                        .and_then(|row| row.get_mut(x as usize))
                    {
                        *cell = CELL_FILLED;
                    }
                }
            }
        }
        out.next = self.next.preview();
        out.score = self.progress.score;
        out.high_score = self.high_score.value();
        out.level = self.progress.level;
        out.speed_ms = speed_ms(self.progress.level, false);
        out.paused = self.paused;
        out.game_over = self.state == TetrisState::GameOver;
    }

    fn is_game_over(&self) -> bool {
        self.state == TetrisState::GameOver
    }

    fn take_terminate_once(&mut self) -> bool {
        let condition = self.is_game_over() || self.latch.terminate_pending();
        self.terminate_edge.read(condition)
    }
}
