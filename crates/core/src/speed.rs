//! Level-driven pacing curves.
//!
//! Both curves shrink geometrically by [`SPEED_FACTOR`] per level and are
//! rounded half away from zero before the floor is applied.

use crate::types::{BASE_SPEED_MS, MIN_SPEED_MS, SPEED_FACTOR};

fn level_divisor(level: u32) -> f64 {
    SPEED_FACTOR.powi(level.saturating_sub(1) as i32)
}

/// Suggested host sleep between polls.
///
/// Acceleration divides the interval by one more factor before rounding.
pub fn speed_ms(level: u32, accelerating: bool) -> u32 {
    let mut ms = BASE_SPEED_MS as f64 / level_divisor(level);
    if accelerating {
        ms /= SPEED_FACTOR;
    }
    (ms.round() as u32).max(MIN_SPEED_MS)
}

/// `max(floor, round(base / 1.5^(level-1)))`
pub fn scaled_tick_limit(base: u32, level: u32, floor: u32) -> u32 {
    let limit = (base as f64 / level_divisor(level)).round() as u32;
    limit.max(floor)
}
