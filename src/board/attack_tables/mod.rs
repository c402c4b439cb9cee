//! Precomputed lookup tables for move generation and evaluation.
//!
//! Leapers (king, knight, pawn) use one mask per square. Sliders use an
//! occlusion-indexed table: the occupancy bits on the slider's unblocked rays
//! are packed into a dense key with `Bitboard::extract_bits`, and that key
//! selects the precomputed attack set. Tables are built once on first use and
//! are read-only afterwards.

mod tables;

use once_cell::sync::Lazy;

use super::pst;
use super::types::{Bitboard, Color, Piece, Square};
use tables::{SliderTable, BISHOP_DIRS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRS};

pub(crate) struct LookupTables {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn_moves: [[Bitboard; 64]; 2],
    pawn_attacks: [[Bitboard; 64]; 2],
    rook: SliderTable,
    bishop: SliderTable,
    between: Box<[[Bitboard; 64]; 64]>,
    line: Box<[[Bitboard; 64]; 64]>,
    // [endgame][color][piece][square]
    piece_values: [[[[i32; 64]; 6]; 2]; 2],
}

impl LookupTables {
    fn build() -> Self {
        let (between, line) = tables::between_and_line_tables();

        let mut piece_values = [[[[0; 64]; 6]; 2]; 2];
        for (phase, by_color) in piece_values.iter_mut().enumerate() {
            for color in Color::BOTH {
                for piece in Piece::ALL {
                    for idx in 0..64u8 {
                        by_color[color.index()][piece.index()][idx as usize] =
                            pst::piece_square_value(piece, Square(idx), color, phase == 1);
                    }
                }
            }
        }

        let tables = LookupTables {
            king: tables::leaper_table(&KING_DELTAS),
            knight: tables::leaper_table(&KNIGHT_DELTAS),
            pawn_moves: tables::pawn_move_table(),
            pawn_attacks: tables::pawn_attack_table(),
            rook: SliderTable::build(&ROOK_DIRS),
            bishop: SliderTable::build(&BISHOP_DIRS),
            between,
            line,
            piece_values,
        };
        log::debug!(
            "lookup tables ready: {} rook entries, {} bishop entries",
            tables.rook.len(),
            tables.bishop.len()
        );
        tables
    }
}

static TABLES: Lazy<LookupTables> = Lazy::new(LookupTables::build);

/// Build the tables now instead of on first use. Safe to call repeatedly.
pub fn init() {
    Lazy::force(&TABLES);
}

#[inline]
pub(crate) fn king_moves(sq: Square) -> Bitboard {
    TABLES.king[sq.index()]
}

#[inline]
pub(crate) fn knight_moves(sq: Square) -> Bitboard {
    TABLES.knight[sq.index()]
}

/// Single forward step for a pawn of `color`
#[inline]
pub(crate) fn pawn_moves(sq: Square, color: Color) -> Bitboard {
    TABLES.pawn_moves[color.index()][sq.index()]
}

#[inline]
pub(crate) fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    TABLES.pawn_attacks[color.index()][sq.index()]
}

/// Rook rays on an empty board
#[inline]
pub(crate) fn rook_base(sq: Square) -> Bitboard {
    TABLES.rook.base[sq.index()]
}

/// Bishop rays on an empty board
#[inline]
pub(crate) fn bishop_base(sq: Square) -> Bitboard {
    TABLES.bishop.base[sq.index()]
}

/// Rook attacks given the occupancy; the first blocker on each ray is included
#[inline]
pub(crate) fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    TABLES.rook.attacks(sq, occupancy)
}

#[inline]
pub(crate) fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    TABLES.bishop.attacks(sq, occupancy)
}

#[inline]
pub(crate) fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy) | bishop_attacks(sq, occupancy)
}

/// Unblocked rays and blocked attacks for a slider, as `(base, attacks)`.
/// Returns `None` for non-sliding pieces.
#[inline]
pub(crate) fn slider_moves(piece: Piece, sq: Square, occupancy: Bitboard) -> Option<(Bitboard, Bitboard)> {
    match piece {
        Piece::Rook => Some((rook_base(sq), rook_attacks(sq, occupancy))),
        Piece::Bishop => Some((bishop_base(sq), bishop_attacks(sq, occupancy))),
        Piece::Queen => Some((
            rook_base(sq) | bishop_base(sq),
            queen_attacks(sq, occupancy),
        )),
        _ => None,
    }
}

/// Squares strictly between `a` and `b`, empty if they share no line
#[inline]
pub(crate) fn between(a: Square, b: Square) -> Bitboard {
    TABLES.between[a.index()][b.index()]
}

/// The whole rank, file or diagonal through `a` and `b`, empty if they share none
#[inline]
pub(crate) fn line(a: Square, b: Square) -> Bitboard {
    TABLES.line[a.index()][b.index()]
}

/// Material plus square bonus for a piece, by game phase
#[inline]
pub(crate) fn piece_value(piece: Piece, sq: Square, color: Color, endgame: bool) -> i32 {
    TABLES.piece_values[usize::from(endgame)][color.index()][piece.index()][sq.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn squares(names: &[&str]) -> Bitboard {
        names.iter().fold(Bitboard::EMPTY, |acc, n| acc | sq(n).bit())
    }

    #[test]
    fn test_knight_moves_corner() {
        assert_eq!(knight_moves(sq("a1")), squares(&["b3", "c2"]));
        assert_eq!(knight_moves(sq("e4")).popcount(), 8);
    }

    #[test]
    fn test_king_moves_edge() {
        assert_eq!(king_moves(sq("h1")), squares(&["g1", "g2", "h2"]));
    }

    #[test]
    fn test_pawn_tables() {
        assert_eq!(pawn_moves(sq("e2"), Color::White), squares(&["e3"]));
        assert_eq!(pawn_moves(sq("e7"), Color::Black), squares(&["e6"]));
        assert_eq!(pawn_attacks(sq("a2"), Color::White), squares(&["b3"]));
        assert_eq!(pawn_attacks(sq("d5"), Color::Black), squares(&["c4", "e4"]));
    }

    #[test]
    fn test_rook_attacks_empty_board() {
        let attacks = rook_attacks(sq("e4"), Bitboard::EMPTY);
        let expected = (Bitboard::rank_mask(3) | Bitboard::file_mask(4)) & !sq("e4").bit();
        assert_eq!(attacks, expected);
        assert_eq!(rook_base(sq("e4")), expected);
    }

    #[test]
    fn test_rook_attacks_with_blockers() {
        let blockers = squares(&["e6", "c4", "h8"]);
        let attacks = rook_attacks(sq("e4"), blockers);
        assert!(attacks.contains(sq("e6")));
        assert!(!attacks.contains(sq("e7")));
        assert!(attacks.contains(sq("c4")));
        assert!(!attacks.contains(sq("b4")));
        assert!(attacks.contains(sq("h4")));
    }

    #[test]
    fn test_bishop_attacks_with_blockers() {
        let attacks = bishop_attacks(sq("e4"), squares(&["g6"]));
        assert!(attacks.contains(sq("g6")));
        assert!(!attacks.contains(sq("h7")));
        assert!(attacks.contains(sq("a8")));
        assert!(attacks.contains(sq("b1")));
    }

    #[test]
    fn test_slider_table_matches_ray_cast() {
        let occupancies = [
            Bitboard::EMPTY,
            Bitboard(0xFF00_FF00_FF00_FF00),
            Bitboard(0x0042_1800_0018_4200),
        ];
        for idx in 0..64u8 {
            let s = Square(idx);
            for &occ in &occupancies {
                assert_eq!(rook_attacks(s, occ), tables::ray_cast(s, &ROOK_DIRS, occ));
                assert_eq!(bishop_attacks(s, occ), tables::ray_cast(s, &BISHOP_DIRS, occ));
            }
        }
    }

    #[test]
    fn test_between_masks() {
        assert_eq!(between(sq("a1"), sq("a4")), squares(&["a2", "a3"]));
        assert_eq!(between(sq("h8"), sq("e5")), squares(&["g7", "f6"]));
        assert_eq!(between(sq("a1"), sq("a2")), Bitboard::EMPTY);
        assert_eq!(between(sq("a1"), sq("b3")), Bitboard::EMPTY);
        assert_eq!(between(sq("c3"), sq("f3")), between(sq("f3"), sq("c3")));
    }

    #[test]
    fn test_line_masks() {
        assert_eq!(line(sq("b2"), sq("d4")), line(sq("a1"), sq("h8")));
        assert_eq!(line(sq("e1"), sq("e5")), Bitboard::file_mask(4));
        assert_eq!(line(sq("a1"), sq("b3")), Bitboard::EMPTY);
    }

    #[test]
    fn test_piece_values_by_phase() {
        let mg = piece_value(Piece::Pawn, sq("e7"), Color::White, false);
        let eg = piece_value(Piece::Pawn, sq("e7"), Color::White, true);
        assert_eq!(mg, 150);
        assert_eq!(eg, 250);
        assert_eq!(piece_value(Piece::King, sq("g1"), Color::White, false), 15);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        assert_eq!(king_moves(sq("a1")).popcount(), 3);
    }
}
