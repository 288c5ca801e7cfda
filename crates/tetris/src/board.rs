//! Board module - the settled blocks of the puzzle
//!
//! A 10x20 grid stored as a flat array for cache locality.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Every accessor is bounds-checked.

use arrayvec::ArrayVec;

use crate::types::{Field, CELL_EMPTY, CELL_FILLED, FIELD_HEIGHT, FIELD_WIDTH};

const BOARD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells (y * WIDTH + x)
    cells: [u8; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [CELL_EMPTY; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i32 || y < 0 || y >= FIELD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * FIELD_WIDTH + (x as usize))
    }

    /// `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: u8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != CELL_EMPTY)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FIELD_HEIGHT {
            return false;
        }
        let start = y * FIELD_WIDTH;
        self.cells[start..start + FIELD_WIDTH]
            .iter()
            .all(|&c| c != CELL_EMPTY)
    }

    /// Remove every full row, compacting the rest downward.
    ///
    /// Returns the cleared row indices, bottom first. Empty rows appear at
    /// the top.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, FIELD_HEIGHT> {
        let mut cleared = ArrayVec::new();
        let mut write_y = FIELD_HEIGHT;

        for read_y in (0..FIELD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * FIELD_WIDTH;
                    self.cells
                        .copy_within(src..src + FIELD_WIDTH, write_y * FIELD_WIDTH);
                }
            }
        }

        self.cells[..write_y * FIELD_WIDTH].fill(CELL_EMPTY);
        cleared
    }

    pub fn clear(&mut self) {
        self.cells.fill(CELL_EMPTY);
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != CELL_EMPTY).count()
    }

    /// Copy into a snapshot field.
    pub fn write_field(&self, field: &mut Field) {
        for (y, row) in field.iter_mut().enumerate() {
            let start = y * FIELD_WIDTH;
            row.copy_from_slice(&self.cells[start..start + FIELD_WIDTH]);
        }
    }

    /// Build from text rows, `#` filled and anything else empty; missing
    /// rows at the top stay empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = FIELD_HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(FIELD_HEIGHT).enumerate() {
            for (x, ch) in row.chars().take(FIELD_WIDTH).enumerate() {
                if ch == '#' {
                    board.set(x as i32, (offset + i) as i32, CELL_FILLED);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
