//! Bag module - 7-bag piece generation
//!
//! Each bag holds one of every shape in shuffled order. Pieces are drawn
//! until the bag is empty, then a fresh bag is shuffled, so any 7 draws
//! starting at a bag boundary are a permutation of the shapes.
//!
//! Shuffling uses a seeded LCG so a game is reproducible from its seed.

use crate::pieces::PieceKind;

/// 32-bit linear congruential generator driving the bag shuffle.
///
/// Equal seeds give equal piece sequences. Seed 0 is treated as 1.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    const MUL: u32 = 1_664_525;
    const INC: u32 = 1_013_904_223;

    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        self.state
    }

    /// Uniform-ish pick in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    /// In-place Fisher-Yates.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for hi in (1..items.len()).rev() {
            let pick = self.below(hi as u32 + 1) as usize;
            items.swap(hi, pick);
        }
    }
}

/// Shuffled working set of the seven shapes.
#[derive(Debug, Clone)]
pub struct Bag {
    pieces: [PieceKind; 7],
    /// Next slot to hand out; 7 means empty.
    index: usize,
    rng: SimpleRng,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            pieces: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.pieces = PieceKind::ALL;
        self.rng.shuffle(&mut self.pieces);
        self.index = 0;
    }

    /// Next piece, refilling first when the bag is spent.
    pub fn draw(&mut self) -> PieceKind {
        if self.index >= self.pieces.len() {
            self.refill();
        }
        let piece = self.pieces[self.index];
        self.index += 1;
        piece
    }

    /// Pieces left before the next refill.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.pieces[self.index..]
    }
}
