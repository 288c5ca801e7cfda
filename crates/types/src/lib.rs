//! Core types module - shared data structures and constants
//!
//! Pure data shared by both engines, the terminal front end and the adapter.
//! Nothing here depends on I/O or on a particular game.
//!
//! # Field Dimensions
//!
//! Both games play on the same fixed field:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19), row 0 at the top
//! - **Preview**: 4x4 look-ahead grid (empty for snake)
//!
//! # Speed Curve
//!
//! The host loop sleeps `speed_ms` between polls:
//!
//! | Level | ms |
//! |-------|----|
//! | 1 | 32 |
//! | 2 | 21 |
//! | 3 | 14 |
//! | 4 | 9 |
//! | 5+ | 8 (floor) |
//!
//! # Examples
//!
//! ```
//! use brick_game_types::{GameInfo, GameKind, UserAction, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let action = UserAction::from_str("left").unwrap();
//! assert_eq!(action, UserAction::Left);
//! assert_eq!(action.as_str(), "left");
//!
//! assert_eq!(GameKind::from_str("TETRIS"), Some(GameKind::Tetris));
//!
//! let info = GameInfo::default();
//! assert_eq!(info.field.len(), FIELD_HEIGHT);
//! assert_eq!(info.field[0].len(), FIELD_WIDTH);
//! assert_eq!(info.level, 1);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Side of the square next-piece preview grid
pub const PREVIEW_SIZE: usize = 4;

/// Highest reachable level in both games
pub const MAX_LEVEL: u32 = 10;

/// Display speed at level 1 in milliseconds
pub const BASE_SPEED_MS: u32 = 32;

/// Lower bound for the display speed
pub const MIN_SPEED_MS: u32 = 8;

/// Per-level speed-up factor shared by the speed and tick curves
pub const SPEED_FACTOR: f64 = 1.5;

/// Empty field cell
pub const CELL_EMPTY: u8 = 0;

/// Occupied field cell (snake body or settled puzzle block)
pub const CELL_FILLED: u8 = 1;

/// Snake food cell
pub const CELL_FOOD: u8 = 2;

/// Field grid, row-major: `field[row][col]`
pub type Field = [[u8; FIELD_WIDTH]; FIELD_HEIGHT];

/// Next-piece preview grid
pub type Preview = [[u8; PREVIEW_SIZE]; PREVIEW_SIZE];

/// Input actions accepted by both engines.
///
/// The host pairs every action with a `held` flag; only `Action` (snake
/// acceleration) and `Down` (puzzle fast drop) give it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// Begin a new session (restarts after game over)
    Start,
    /// Toggle pause
    Pause,
    /// Request the session to end
    Terminate,
    Left,
    Right,
    Up,
    Down,
    /// Game-specific: accelerate (snake) or hard drop (puzzle)
    Action,
}

impl UserAction {
    pub const ALL: [UserAction; 8] = [
        UserAction::Start,
        UserAction::Pause,
        UserAction::Terminate,
        UserAction::Left,
        UserAction::Right,
        UserAction::Up,
        UserAction::Down,
        UserAction::Action,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_game_types::UserAction;
    ///
    /// assert_eq!(UserAction::from_str("Pause"), Some(UserAction::Pause));
    /// assert_eq!(UserAction::from_str("ACTION"), Some(UserAction::Action));
    /// assert_eq!(UserAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(UserAction::Start),
            "pause" => Some(UserAction::Pause),
            "terminate" => Some(UserAction::Terminate),
            "left" => Some(UserAction::Left),
            "right" => Some(UserAction::Right),
            "up" => Some(UserAction::Up),
            "down" => Some(UserAction::Down),
            "action" => Some(UserAction::Action),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::Start => "start",
            UserAction::Pause => "pause",
            UserAction::Terminate => "terminate",
            UserAction::Left => "left",
            UserAction::Right => "right",
            UserAction::Up => "up",
            UserAction::Down => "down",
            UserAction::Action => "action",
        }
    }
}

/// Which engine a front end drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    Tetris,
}

impl GameKind {
    /// Parse game name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snake" => Some(GameKind::Snake),
            "tetris" => Some(GameKind::Tetris),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Tetris => "tetris",
        }
    }
}

/// Read-only snapshot returned by every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameInfo {
    pub field: Field,
    pub next: Preview,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameInfo {
    pub fn clear(&mut self) {
        self.field = [[CELL_EMPTY; FIELD_WIDTH]; FIELD_HEIGHT];
        self.next = [[CELL_EMPTY; PREVIEW_SIZE]; PREVIEW_SIZE];
        self.score = 0;
        self.high_score = 0;
        self.level = 1;
        self.speed_ms = BASE_SPEED_MS;
        self.paused = false;
        self.game_over = false;
    }

    /// True when neither paused nor over.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Number of non-empty field cells.
    pub fn filled_cells(&self) -> usize {
        self.field
            .iter()
            .flatten()
            .filter(|&&c| c != CELL_EMPTY)
            .count()
    }
}

impl Default for GameInfo {
    fn default() -> Self {
        let mut s = Self {
            field: [[CELL_EMPTY; FIELD_WIDTH]; FIELD_HEIGHT],
            next: [[CELL_EMPTY; PREVIEW_SIZE]; PREVIEW_SIZE],
            score: 0,
            high_score: 0,
            level: 1,
            speed_ms: BASE_SPEED_MS,
            paused: false,
            game_over: false,
        };
        s.clear();
        s
    }
}
