//! Scoring and leveling for cleared lines
//!
//! Two mechanisms raise the level and both tighten the drop pace:
//!
//! - every 600 points the level jumps to `1 + score / 600` (capped), and the
//!   tick limit drops by the number of levels gained
//! - every 10 cleared lines the level rises by one and the tick limit drops
//!   by one; extra lines carry over

use crate::types::MAX_LEVEL;
use brick_game_core::scaled_tick_limit;

pub const POINTS_PER_LEVEL: u32 = 600;
pub const LINES_PER_LEVEL: u32 = 10;

/// Polls per drop at level 1.
pub const BASE_TICK_LIMIT: u32 = 10;

/// Fastest possible pace.
pub const MIN_TICK_LIMIT: u32 = 2;

/// Points for clearing `lines` rows at once.
pub fn line_clear_points(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 700,
        _ => 1500,
    }
}

pub fn tick_limit_for_level(level: u32) -> u32 {
    scaled_tick_limit(BASE_TICK_LIMIT, level, MIN_TICK_LIMIT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    /// Lines toward the next line-driven level.
    pub lines: u32,
    pub tick_limit: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            tick_limit: BASE_TICK_LIMIT,
        }
    }
}

impl Progress {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a clear of `cleared` rows; returns the points awarded.
    pub fn apply_clear(&mut self, cleared: usize) -> u32 {
        if cleared == 0 {
            return 0;
        }
        let points = line_clear_points(cleared);
        self.score = self.score.saturating_add(points);

        let target = (1 + self.score / POINTS_PER_LEVEL).min(MAX_LEVEL);
        if target > self.level {
            let gained = target - self.level;
            self.level = target;
            self.tick_limit = self.tick_limit.saturating_sub(gained).max(MIN_TICK_LIMIT);
        }

        self.lines += cleared as u32;
        if self.lines >= LINES_PER_LEVEL {
            self.lines -= LINES_PER_LEVEL;
            self.level = (self.level + 1).min(MAX_LEVEL);
            if self.tick_limit > MIN_TICK_LIMIT {
                self.tick_limit -= 1;
            }
        }
        points
    }
}
