//! Terminal "game renderer" module.
//!
//! A small text front end shared by both games: [`GameView`] turns a
//! snapshot into lines (pure, testable) and [`TerminalRenderer`] puts those
//! lines on a real terminal through crossterm.

pub mod game_view;
pub mod renderer;

pub use brick_game_types as types;

pub use game_view::GameView;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
