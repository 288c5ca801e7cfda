//! Shared engine plumbing - input latching, pacing curves, persistence
//!
//! Both game engines are built from the same parts:
//!
//! - [`latch`]: single-slot input mailbox with a sticky held flag and an
//!   edge-triggered terminate request
//! - [`engine`]: the polling interface every engine implements
//! - [`speed`]: level-driven display speed and tick-limit curves
//! - [`highscore`]: best-score keeper backed by a pluggable store
//! - [`config`]: environment-driven settings
//!
//! Nothing here knows about a particular game; the rules live in the
//! `brick-game-snake` and `brick-game-tetris` crates.
//!
//! # Example
//!
//! ```
//! use brick_game_core::{HighScore, InputLatch, MemoryStore};
//! use brick_game_types::UserAction;
//!
//! let mut latch = InputLatch::new(UserAction::Down);
//! latch.submit(UserAction::Left, false);
//! latch.submit(UserAction::Down, true);
//! assert_eq!(latch.take_one(), Some(UserAction::Down));
//! assert!(latch.held_state());
//!
//! let store = MemoryStore::with_value(120);
//! let mut high = HighScore::new(store.clone());
//! high.load_once();
//! assert_eq!(high.value(), 120);
//! assert!(high.observe(150));
//! assert_eq!(store.get(), Some(150));
//! ```

pub mod config;
pub mod engine;
pub mod highscore;
pub mod latch;
pub mod speed;

pub use brick_game_types as types;

pub use config::Config;
pub use engine::{EdgeLatch, Engine};
pub use highscore::{parse_score, FileStore, HighScore, MemoryStore, ScoreStore, StoreError};
pub use latch::InputLatch;
pub use speed::{scaled_tick_limit, speed_ms};
