use super::{Generator, MoveSink};
use crate::board::attack_tables;
use crate::board::types::{Bitboard, Piece, Square, FLAG_CASTLE};

// Back-rank masks on rank 1; shifted up for Black
const QUEEN_SIDE_EMPTY: u64 = 0x0E; // b, c, d
const QUEEN_SIDE_SAFE: u64 = 0x0C; // c, d
const KING_SIDE_EMPTY: u64 = 0x60; // f, g
const KING_SIDE_SAFE: u64 = 0x60;

impl<S: MoveSink, const WHITE: bool> Generator<'_, S, WHITE> {
    pub(super) fn king_moves(&mut self) {
        let enemy_attack = self.board.team(Self::THEM).attack;
        let targets = attack_tables::king_moves(self.king) & !self.own & !enemy_attack;
        self.emit_targets(self.king, Piece::King, targets);
    }

    /// Castling, assuming the king is not in check
    pub(super) fn castling_moves(&mut self) {
        let board = self.board;
        let td = board.team(Self::US);
        let enemy_attack = board.team(Self::THEM).attack;
        let back_rank = Self::US.back_rank();
        let shift = u32::from(back_rank) * 8;
        let on_rank = |mask: u64| Bitboard(mask << shift);

        if td.can_castle_q
            && (self.all & on_rank(QUEEN_SIDE_EMPTY)).is_empty()
            && (enemy_attack & on_rank(QUEEN_SIDE_SAFE)).is_empty()
        {
            self.emit(self.king, Square::at(2, back_rank), Piece::King, Piece::King, FLAG_CASTLE);
        }
        if td.can_castle_k
            && (self.all & on_rank(KING_SIDE_EMPTY)).is_empty()
            && (enemy_attack & on_rank(KING_SIDE_SAFE)).is_empty()
        {
            self.emit(self.king, Square::at(6, back_rank), Piece::King, Piece::King, FLAG_CASTLE);
        }
    }
}
