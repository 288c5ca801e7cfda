//! Movement, collision, food placement and leveling rules.

use crate::model::{Point, Snake, HEIGHT, WIDTH};
use crate::types::MAX_LEVEL;
use brick_game_core::scaled_tick_limit;

/// Points per level.
pub const SCORE_PER_LEVEL: u32 = 5;

/// Polls per move at level 1.
pub const BASE_TICK_LIMIT: u32 = 5;

/// Polls per move at level 1 while accelerating.
pub const FAST_TICK_LIMIT: u32 = 3;

pub fn will_eat(head: Point, food: Point) -> bool {
    head == food
}

/// Leaving the field or running into the body ends the game.
///
/// The tail only counts when eating, since it stays put on that move.
pub fn collides(snake: &Snake, head: Point, eating: bool) -> bool {
    !head.in_bounds() || snake.occupies(head, eating)
}

/// Scan start for the first food of a session.
pub fn initial_food_seed(head: Point, score: u32) -> Point {
    let (hx, hy, s) = (head.x as i64, head.y as i64, score as i64);
    Point::new(
        ((hx * 31 + hy * 17 + s * 13).abs() % WIDTH as i64) as i32,
        ((hx * 7 + hy * 11 + s * 5).abs() % HEIGHT as i64) as i32,
    )
}

/// Scan start after the food at `food` was eaten.
pub fn next_food_seed(food: Point, score: u32) -> Point {
    let (fx, fy, s) = (food.x as i64, food.y as i64, score as i64);
    let s1 = fx + fy + s;
    let s2 = fx * 31 + fy * 17 + s * 13;
    Point::new(
        ((s1.abs() + s2.abs()) % WIDTH as i64) as i32,
        (((s1 * 7).abs() + (s2 * 11).abs()) % HEIGHT as i64) as i32,
    )
}

/// First cell not on the body, scanning row-wise from `seed`.
pub fn scan_free_cell(seed: Point, snake: &Snake) -> Option<Point> {
    (0..WIDTH * HEIGHT)
        .map(|k| Point::new((seed.x + k) % WIDTH, (seed.y + k / WIDTH) % HEIGHT))
        .find(|&p| !snake.contains(p))
}

pub fn level_for_score(score: u32) -> u32 {
    (1 + score / SCORE_PER_LEVEL).clamp(1, MAX_LEVEL)
}

/// `(base, fast)` polls per move at `level`.
pub fn tick_limits_for_level(level: u32) -> (u32, u32) {
    let base = scaled_tick_limit(BASE_TICK_LIMIT, level, 2);
    let fast = ((base as f64 / 2.0).round() as u32).max(1);
    (base, fast)
}
