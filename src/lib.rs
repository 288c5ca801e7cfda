//! Brick game (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, integration
//! tests and benches can write `brick_game::snake::SnakeGame` and friends.

pub use brick_game_adapter as adapter;
pub use brick_game_core as core;
pub use brick_game_input as input;
pub use brick_game_snake as snake;
pub use brick_game_term as term;
pub use brick_game_tetris as tetris;
pub use brick_game_types as types;

use crate::core::{Config, Engine};
use crate::types::GameKind;

/// Build the engine for `kind` from environment-driven settings.
pub fn build_engine(kind: GameKind, config: &Config) -> Box<dyn Engine> {
    match kind {
        GameKind::Snake => Box::new(snake::SnakeGame::from_config(config)),
        GameKind::Tetris => Box::new(tetris::TetrisGame::from_config(config)),
    }
}
