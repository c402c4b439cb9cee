//! Recomputation of one side's attacks, checks, pins and values.

use super::attack_tables;
use super::pst::{space_bonus, MOBILITY_BONUS};
use super::types::{Bitboard, Color, Piece};
use super::Board;

impl Board {
    /// Rebuild `color`'s attack set, its checkers against the enemy king, the
    /// pins against the enemy king, and `color`'s piece values and total.
    ///
    /// Sliders see the board without the enemy king, so squares behind the
    /// king along a checking ray count as attacked.
    pub fn update_attacks_pins_values(&mut self, color: Color) {
        let endgame = self.is_endgame();
        let [white, black] = &mut self.teams;
        let (td, etd) = match color {
            Color::White => (white, black),
            Color::Black => (black, white),
        };

        let all = td.occupy | etd.occupy;
        let enemy_king = etd.king_pos;
        let enemy_king_bit = enemy_king.bit();
        let sight = all & !enemy_king_bit;

        td.attack = Bitboard::EMPTY;
        td.checkers = Bitboard::EMPTY;
        etd.pinned = Bitboard::EMPTY;

        let mut total = 0;
        for sq in td.occupy.iter() {
            let Some(piece) = self.piece_types[sq.index()] else {
                debug_assert!(false, "occupied square {sq} has no piece type");
                continue;
            };

            let moves = match piece {
                Piece::Pawn => attack_tables::pawn_attacks(sq, color),
                Piece::Knight => attack_tables::knight_moves(sq),
                Piece::King => attack_tables::king_moves(sq),
                Piece::Bishop | Piece::Rook | Piece::Queen => {
                    let Some((base, moves)) = attack_tables::slider_moves(piece, sq, sight) else {
                        continue;
                    };
                    if base.contains(enemy_king) {
                        let blockers = attack_tables::between(sq, enemy_king) & all;
                        if blockers.is_single() {
                            etd.pinned |= blockers;
                        }
                    }
                    moves
                }
            };

            td.attack |= moves;
            if moves.contains(enemy_king) {
                if td.checkers.is_empty() {
                    td.first_checker = sq;
                }
                td.checkers.set(sq, true);
            }

            let mobility = (moves & !td.occupy).popcount() as i32;
            let value = attack_tables::piece_value(piece, sq, color, endgame)
                + MOBILITY_BONUS[piece.index()] * mobility;
            self.piece_values[sq.index()] = value;
            total += value;
        }

        td.total_value = total + space_bonus(td.attack, color, endgame);
    }
}
