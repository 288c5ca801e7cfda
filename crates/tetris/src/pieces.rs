//! Pieces module - the seven 4x4 shape masks and their rotation
//!
//! Every shape lives in a 4x4 box whose top-left corner is the piece anchor.
//! Rotation turns the whole box; there are no wall kicks.

use crate::types::{Preview, CELL_EMPTY, CELL_FILLED, FIELD_WIDTH, PREVIEW_SIZE};

/// 4x4 occupancy mask, row-major.
pub type Mask = [[bool; 4]; 4];

const fn mask_from_bits(bits: [u8; 4]) -> Mask {
    let mut mask = [[false; 4]; 4];
    let mut r = 0;
    while r < 4 {
        let mut c = 0;
        while c < 4 {
            mask[r][c] = (bits[r] & (0b1000 >> c)) != 0;
            c += 1;
        }
        r += 1;
    }
    mask
}

const I_MASK: Mask = mask_from_bits([0b0000, 0b1111, 0b0000, 0b0000]);
const J_MASK: Mask = mask_from_bits([0b0000, 0b0100, 0b0111, 0b0000]);
const L_MASK: Mask = mask_from_bits([0b0000, 0b0001, 0b0111, 0b0000]);
const O_MASK: Mask = mask_from_bits([0b0000, 0b0110, 0b0110, 0b0000]);
const S_MASK: Mask = mask_from_bits([0b0000, 0b0011, 0b0110, 0b0000]);
const T_MASK: Mask = mask_from_bits([0b0000, 0b0010, 0b0111, 0b0000]);
const Z_MASK: Mask = mask_from_bits([0b0000, 0b0110, 0b0011, 0b0000]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Spawn orientation.
    pub fn mask(self) -> Mask {
        match self {
            PieceKind::I => I_MASK,
            PieceKind::J => J_MASK,
            PieceKind::L => L_MASK,
            PieceKind::O => O_MASK,
            PieceKind::S => S_MASK,
            PieceKind::T => T_MASK,
            PieceKind::Z => Z_MASK,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Spawn mask as a preview grid.
    pub fn preview(self) -> Preview {
        let mask = self.mask();
        let mut out = [[CELL_EMPTY; PREVIEW_SIZE]; PREVIEW_SIZE];
        for (r, row) in mask.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if filled {
                    out[r][c] = CELL_FILLED;
                }
            }
        }
        out
    }
}

/// `m'[r][c] = m[3-c][r]`
pub fn rotate_cw(mask: &Mask) -> Mask {
    let mut out = [[false; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = mask[3 - c][r];
        }
    }
    out
}

/// `m'[r][c] = m[c][3-r]`
pub fn rotate_ccw(mask: &Mask) -> Mask {
    let mut out = [[false; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = mask[c][3 - r];
        }
    }
    out
}

/// The falling piece: a mask anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub mask: Mask,
    pub x: i32,
    /// May be negative while the piece pokes out above the field.
    pub y: i32,
}

impl Piece {
    pub const SPAWN_X: i32 = FIELD_WIDTH as i32 / 2 - 2;
    pub const SPAWN_Y: i32 = -1;

    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            mask: kind.mask(),
            x: Self::SPAWN_X,
            y: Self::SPAWN_Y,
        }
    }

    /// Field coordinates of the filled mask cells, offset by `(dx, dy)`.
    pub fn cells_at(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(c, _)| (self.x + dx + c as i32, self.y + dy + r as i32))
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_at(0, 0)
    }

    pub fn rotate_cw(&mut self) {
        self.mask = rotate_cw(&self.mask);
    }

    pub fn rotate_ccw(&mut self) {
        self.mask = rotate_ccw(&self.mask);
    }
}
