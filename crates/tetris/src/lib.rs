//! Falling-block puzzle engine
//!
//! Seven four-cell shapes fall into a 10x20 well. Full rows clear and score
//! 100/300/700/1500 for one to four lines; the level rises every 600 points
//! and every 10 lines, shortening the drop interval.
//!
//! # Module Structure
//!
//! - [`pieces`]: shape masks, rotation, the falling [`Piece`]
//! - [`bag`]: seeded 7-bag shape generator
//! - [`board`]: settled blocks and row clearing
//! - [`rules`]: collision, shifting, rotation, hard drop, commit
//! - [`scoring`]: points, levels, drop pace
//! - [`fsm`]: states, handler events and the transition table
//! - [`game`]: [`TetrisGame`], the [`Engine`](brick_game_core::Engine) implementation
//!
//! # Example
//!
//! ```
//! use brick_game_core::{Engine, MemoryStore};
//! use brick_game_tetris::{TetrisGame, TetrisState};
//! use brick_game_types::UserAction;
//!
//! let mut game = TetrisGame::with_store(42, MemoryStore::new());
//! game.advance_and_snapshot(); // START
//! let info = game.advance_and_snapshot(); // SPAWN
//! assert_eq!(info.filled_cells(), 4);
//!
//! game.submit_input(UserAction::Action, true);
//! game.advance_and_snapshot();
//! assert_eq!(game.state(), TetrisState::Fix);
//! ```

pub mod bag;
pub mod board;
pub mod fsm;
pub mod game;
pub mod pieces;
pub mod rules;
pub mod scoring;

pub use brick_game_types as types;

pub use bag::{Bag, SimpleRng};
pub use board::Board;
pub use fsm::{transition, TetrisEvent, TetrisState};
pub use game::TetrisGame;
pub use pieces::{Piece, PieceKind};
pub use scoring::Progress;
