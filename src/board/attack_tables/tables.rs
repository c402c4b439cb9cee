//! Table construction. Everything here runs once, when the lookup tables are
//! first touched.

use crate::board::types::{Bitboard, Color, Square};

pub(super) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(super) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(super) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub(super) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// One bit per delta that stays on the board, for every square.
pub(super) fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (idx, slot) in table.iter_mut().enumerate() {
        let sq = Square(idx as u8);
        for &(df, dr) in deltas {
            if let Some(to) = sq.offset(df, dr) {
                slot.set(to, true);
            }
        }
    }
    table
}

/// Single-step forward squares, per color
pub(super) fn pawn_move_table() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let dr = if color == Color::White { 1 } else { -1 };
        for (idx, slot) in table[color.index()].iter_mut().enumerate() {
            if let Some(to) = Square(idx as u8).offset(0, dr) {
                slot.set(to, true);
            }
        }
    }
    table
}

/// Diagonal capture squares, per color, regardless of what stands there
pub(super) fn pawn_attack_table() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let dr = if color == Color::White { 1 } else { -1 };
        table[color.index()] = leaper_table(&[(-1, dr), (1, dr)]);
    }
    table
}

/// Walk each direction until the edge, stopping on (and including) the first
/// occupied square.
pub(super) fn ray_cast(sq: Square, dirs: &[(i8, i8); 4], occupancy: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = sq;
        while let Some(next) = cur.offset(df, dr) {
            result.set(next, true);
            if occupancy.contains(next) {
                break;
            }
            cur = next;
        }
    }
    result
}

/// Occlusion-indexed attacks for one slider type.
///
/// For each square the relevant occupancy (the bits under `base[sq]`) is
/// compressed with `extract_bits` into a dense key, which indexes that
/// square's slice of `attacks`.
pub(crate) struct SliderTable {
    pub(super) base: [Bitboard; 64],
    offsets: [usize; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    pub(super) fn build(dirs: &[(i8, i8); 4]) -> Self {
        let mut base = [Bitboard::EMPTY; 64];
        let mut offsets = [0usize; 64];
        let mut total = 0usize;
        for idx in 0..64 {
            base[idx] = ray_cast(Square(idx as u8), dirs, Bitboard::EMPTY);
            offsets[idx] = total;
            total += 1usize << base[idx].popcount();
        }

        let mut attacks = vec![Bitboard::EMPTY; total];
        for idx in 0..64 {
            let sq = Square(idx as u8);
            let mask = base[idx];
            for key in 0..(1u64 << mask.popcount()) {
                let occupancy = Bitboard::deposit_bits(key, mask);
                attacks[offsets[idx] + key as usize] = ray_cast(sq, dirs, occupancy);
            }
        }

        SliderTable {
            base,
            offsets,
            attacks,
        }
    }

    #[inline]
    pub(super) fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let idx = sq.index();
        let key = occupancy.extract_bits(self.base[idx]) as usize;
        self.attacks[self.offsets[idx] + key]
    }

    pub(super) fn len(&self) -> usize {
        self.attacks.len()
    }
}

/// Squares strictly between and full edge-to-edge line for every aligned
/// pair of squares. Pairs that share no line stay empty.
pub(super) fn between_and_line_tables() -> (Box<[[Bitboard; 64]; 64]>, Box<[[Bitboard; 64]; 64]>) {
    let mut between = Box::new([[Bitboard::EMPTY; 64]; 64]);
    let mut line = Box::new([[Bitboard::EMPTY; 64]; 64]);

    for from_idx in 0..64u8 {
        let from = Square(from_idx);
        for &(df, dr) in ROOK_DIRS.iter().chain(BISHOP_DIRS.iter()) {
            let full_line = walk(from, df, dr) | walk(from, -df, -dr) | from.bit();

            let mut gap = Bitboard::EMPTY;
            let mut cur = from;
            while let Some(to) = cur.offset(df, dr) {
                between[from.index()][to.index()] = gap;
                line[from.index()][to.index()] = full_line;
                gap.set(to, true);
                cur = to;
            }
        }
    }

    (between, line)
}

fn walk(from: Square, df: i8, dr: i8) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    let mut cur = from;
    while let Some(next) = cur.offset(df, dr) {
        result.set(next, true);
        cur = next;
    }
    result
}
