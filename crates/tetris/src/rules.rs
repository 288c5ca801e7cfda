//! Movement and collision rules for the falling piece.
//!
//! Rows above the field are open space: a piece may hang off the top, but
//! never past the side walls or the floor.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{CELL_FILLED, FIELD_HEIGHT, FIELD_WIDTH};

/// Would `piece` fit after shifting by `(dx, dy)`?
pub fn can_move(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece.cells_at(dx, dy).all(|(x, y)| {
        let outside = x < 0 || x >= FIELD_WIDTH as i32 || y >= FIELD_HEIGHT as i32;
        !outside && !(y >= 0 && board.is_occupied(x, y))
    })
}

/// Shift if possible; reports whether the piece moved.
pub fn try_shift(board: &Board, piece: &mut Piece, dx: i32, dy: i32) -> bool {
    if !can_move(board, piece, dx, dy) {
        return false;
    }
    piece.x += dx;
    piece.y += dy;
    true
}

/// Clockwise rotation in place, undone if the result does not fit.
pub fn try_rotate(board: &Board, piece: &mut Piece) -> bool {
    piece.rotate_cw();
    if can_move(board, piece, 0, 0) {
        return true;
    }
    piece.rotate_ccw();
    false
}

/// Drop to the lowest fitting row; returns the rows fallen.
pub fn hard_drop(board: &Board, piece: &mut Piece) -> u32 {
    let mut rows = 0;
    while try_shift(board, piece, 0, 1) {
        rows += 1;
    }
    rows
}

/// Whether a freshly spawned piece has room to play.
pub fn spawn_fits(board: &Board, piece: &Piece) -> bool {
    can_move(board, piece, 0, 1) || can_move(board, piece, 0, 0)
}

/// Write the piece into the board.
///
/// Returns false when any cell lies above the top row; those cells are
/// dropped and the rest are still written.
pub fn commit(board: &mut Board, piece: &Piece) -> bool {
    let mut inside = true;
    for (x, y) in piece.cells() {
        if y < 0 {
            inside = false;
        } else {
            board.set(x, y, CELL_FILLED);
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceKind;

    #[test]
    fn test_walls_and_floor_block() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.x = 0;
        assert!(!can_move(&board, &piece, -1, 0));
        piece.x = 6;
        assert!(!can_move(&board, &piece, 1, 0));
        piece.y = 18;
        assert!(!can_move(&board, &piece, 0, 1));
        assert!(can_move(&board, &piece, 0, 0));
    }

    #[test]
    fn test_rows_above_the_top_are_open() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);
        piece.y = -3;
        assert!(can_move(&board, &piece, 0, 0));
    }

    #[test]
    fn test_settled_blocks_collide() {
        let board = Board::from_rows(&["....#....."]);
        let mut piece = Piece::spawn(PieceKind::I);
        piece.y = 17;
        assert!(!can_move(&board, &piece, 0, 1));
        assert!(try_shift(&board, &mut piece, 1, 0));
        assert_eq!(piece.x, 4);
    }

    #[test]
    fn test_blocked_rotation_rolls_back() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.y = 17; // horizontal in row 18
        let before = piece.mask;
        assert!(!try_rotate(&board, &mut piece));
        assert_eq!(piece.mask, before);
    }

    #[test]
    fn test_free_rotation_applies() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.y = 5;
        assert!(try_rotate(&board, &mut piece));
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 5), (5, 6), (5, 7), (5, 8)]);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);
        let rows = hard_drop(&board, &mut piece);
        assert_eq!(rows, 18);
        assert_eq!(piece.y, 17);
        assert!(piece.cells().all(|(_, y)| y == 18 || y == 19));
    }

    #[test]
    fn test_commit_reports_cells_above_top() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceKind::J);
        piece.y = -2; // rows -1 and 0
        assert!(!commit(&mut board, &piece));
        assert_eq!(board.filled_count(), 3);

        let mut board = Board::new();
        piece.y = 10;
        assert!(commit(&mut board, &piece));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_spawn_blocked_by_full_top() {
        let mut board = Board::new();
        for y in 0..3 {
            for x in 1..10 {
                board.set(x, y, CELL_FILLED);
            }
        }
        let piece = Piece::spawn(PieceKind::T);
        assert!(!spawn_fits(&board, &piece));
        assert!(spawn_fits(&Board::new(), &piece));
    }
}
