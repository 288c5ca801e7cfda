//! Environment-driven settings shared by every front end.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::GameKind;

pub const SNAKE_SCORE_FILE_ENV: &str = "BRICK_GAME_SNAKE_SCORE_FILE";
pub const TETRIS_SCORE_FILE_ENV: &str = "BRICK_GAME_TETRIS_SCORE_FILE";
pub const SEED_ENV: &str = "BRICK_GAME_SEED";

pub const DEFAULT_SNAKE_SCORE_FILE: &str = "snake_highscore.txt";
pub const DEFAULT_TETRIS_SCORE_FILE: &str = "tetris_highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snake_score_file: PathBuf,
    pub tetris_score_file: PathBuf,
    /// Bag shuffle seed; `None` derives one from the clock.
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snake_score_file: PathBuf::from(DEFAULT_SNAKE_SCORE_FILE),
            tetris_score_file: PathBuf::from(DEFAULT_TETRIS_SCORE_FILE),
            seed: None,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();
        Self {
            snake_score_file: var(SNAKE_SCORE_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.snake_score_file),
            tetris_score_file: var(TETRIS_SCORE_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.tetris_score_file),
            seed: var(SEED_ENV).and_then(|s| s.parse().ok()),
        }
    }

    pub fn score_file(&self, kind: GameKind) -> &Path {
        match kind {
            GameKind::Snake => &self.snake_score_file,
            GameKind::Tetris => &self.tetris_score_file,
        }
    }

    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
