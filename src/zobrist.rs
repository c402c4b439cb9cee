//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Bitboard, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // [color][piece][square]
    piece: [[[u64; 64]; 6]; 2],
    // [color][0 = queen side, 1 = king side]
    castle: [[u64; 2]; 2],
    // keyed by the en passant target square
    en_passant: [u64; 64],
    turn: [u64; 2],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Use a fixed seed for reproducibility
        let mut keys = ZobristKeys {
            piece: [[[0; 64]; 6]; 2],
            castle: [[0; 2]; 2],
            en_passant: [0; 64],
            turn: [0; 2],
        };

        for by_piece in &mut keys.piece {
            for by_square in by_piece.iter_mut() {
                for key in by_square.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        for by_side in &mut keys.castle {
            for key in by_side.iter_mut() {
                *key = rng.gen();
            }
        }
        for key in &mut keys.en_passant {
            *key = rng.gen();
        }
        for key in &mut keys.turn {
            *key = rng.gen();
        }

        keys
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    ZOBRIST.piece[color.index()][piece.index()][sq.index()]
}

/// Combined key for one side's castling rights
#[inline]
pub(crate) fn castle_key(color: Color, queen_side: bool, king_side: bool) -> u64 {
    let keys = &ZOBRIST.castle[color.index()];
    let mut hash = 0;
    if queen_side {
        hash ^= keys[0];
    }
    if king_side {
        hash ^= keys[1];
    }
    hash
}

/// Key for the en passant target, zero when there is none
#[inline]
pub(crate) fn en_passant_key(target: Bitboard) -> u64 {
    target.lsb().map_or(0, |sq| ZOBRIST.en_passant[sq.index()])
}

#[inline]
pub(crate) fn turn_key(color: Color) -> u64 {
    ZOBRIST.turn[color.index()]
}
