//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into `(UserAction, held)` pairs and tracks
//! held keys so terminals without key-release events still deliver the
//! release the engines need.

pub mod handler;
pub mod map;

pub use brick_game_types as types;

pub use handler::HoldTracker;
pub use map::{handle_key_event, should_quit};
