//! Snake engine
//!
//! A four-segment snake starts in the middle of the 10x20 field heading
//! right. Every few polls it advances one cell; eating food grows it by one
//! and scores a point, hitting a wall or itself ends the game.
//!
//! # Module Structure
//!
//! - [`model`]: points, headings and the body deque
//! - [`rules`]: collision, deterministic food placement, level curve
//! - [`fsm`]: states, handler events and the transition table
//! - [`game`]: [`SnakeGame`], the [`Engine`](brick_game_core::Engine) implementation
//!
//! # Controls
//!
//! | Action | Effect |
//! |--------|--------|
//! | `Left` / `Right` | quarter turn, applied before the next move |
//! | `Action` held | accelerate |
//! | `Action` released | stop accelerating, move on the next poll |
//! | `Pause` | toggle pause |
//! | `Terminate` | end the session |
//! | `Start` | new session after game over |
//!
//! # Example
//!
//! ```
//! use brick_game_core::{Engine, MemoryStore};
//! use brick_game_snake::SnakeGame;
//! use brick_game_types::UserAction;
//!
//! let mut game = SnakeGame::with_store(MemoryStore::new());
//! let info = game.advance_and_snapshot();
//! assert_eq!(info.filled_cells(), 5); // four segments and the food
//!
//! game.submit_input(UserAction::Left, false);
//! game.advance_and_snapshot();
//! assert!(!game.is_game_over());
//! ```

pub mod fsm;
pub mod game;
pub mod model;
pub mod rules;

pub use brick_game_types as types;

pub use fsm::{transition, SnakeEvent, SnakeState};
pub use game::SnakeGame;
pub use model::{Direction, Point, Snake};
