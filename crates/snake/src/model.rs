//! Snake body model
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). The body is stored head first.

use std::collections::VecDeque;

use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

pub const WIDTH: i32 = FIELD_WIDTH as i32;
pub const HEIGHT: i32 = FIELD_HEIGHT as i32;

/// Segments in a freshly started snake.
pub const START_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..WIDTH).contains(&self.x) && (0..HEIGHT).contains(&self.y)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Quarter turn counter-clockwise.
    pub fn turned_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Quarter turn clockwise.
    pub fn turned_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Horizontal snake in the middle of the field, heading right.
    pub fn centered() -> Self {
        let head = Point::new(WIDTH / 2, HEIGHT / 2);
        let body = (0..START_LENGTH as i32)
            .map(|i| Point::new(head.x - i, head.y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
        }
    }

    pub fn head(&self) -> Point {
        // The body is never empty.
        self.body.front().copied().unwrap_or(Point::new(0, 0))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// Overlap test; the tail is skipped when it is about to move away.
    pub fn occupies(&self, p: Point, include_tail: bool) -> bool {
        let n = if include_tail {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(n).any(|&s| s == p)
    }

    /// Push a new head; the tail stays when growing.
    pub fn advance(&mut self, head: Point, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_snake_layout() {
        let snake = Snake::centered();
        let cells: Vec<Point> = snake.iter().copied().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(5, 10),
                Point::new(4, 10),
                Point::new(3, 10),
                Point::new(2, 10)
            ]
        );
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_turns_are_quarter_turns() {
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(d.turned_left().turned_right(), d);
            assert!(!d.turned_left().is_opposite(d));
            assert!(!d.turned_right().is_opposite(d));
            assert_eq!(d.turned_left().turned_left(), d.opposite());
        }
        assert_eq!(Direction::Right.turned_left(), Direction::Up);
        assert_eq!(Direction::Right.turned_right(), Direction::Down);
    }

    #[test]
    fn test_tail_is_excluded_only_when_asked() {
        let snake = Snake::centered();
        let tail = Point::new(2, 10);
        assert!(snake.occupies(tail, true));
        assert!(!snake.occupies(tail, false));
    }

    #[test]
    fn test_advance_moves_or_grows() {
        let mut snake = Snake::centered();
        snake.advance(Point::new(6, 10), false);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Point::new(6, 10));
        assert!(!snake.contains(Point::new(2, 10)));

        snake.advance(Point::new(7, 10), true);
        assert_eq!(snake.len(), 5);
        assert!(snake.contains(Point::new(3, 10)));
    }

    #[test]
    fn test_bounds() {
        assert!(Point::new(0, 0).in_bounds());
        assert!(Point::new(9, 19).in_bounds());
        assert!(!Point::new(10, 0).in_bounds());
        assert!(!Point::new(0, -1).in_bounds());
    }
}
