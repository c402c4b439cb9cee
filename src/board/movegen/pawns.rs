use super::{Generator, MoveSink};
use crate::board::attack_tables;
use crate::board::types::{
    Bitboard, Piece, Square, FLAG_CAPTURE, FLAG_EN_PASSANT, FLAG_PROMOTION, PROMOTION_PIECES,
};

impl<S: MoveSink, const WHITE: bool> Generator<'_, S, WHITE> {
    pub(super) fn pawn_moves(&mut self) {
        let forward: i8 = if WHITE { 1 } else { -1 };
        let start_rank = Self::US.pawn_start_rank();
        let ep_target = self.board.en_passant_to;

        for from in self.pieces(Piece::Pawn).iter() {
            let pin_line = if self.pinned.contains(from) {
                attack_tables::line(from, self.king)
            } else {
                Bitboard::ALL
            };
            let allowed = self.block_mask & pin_line;

            // Pushes
            if let Some(one) = from.offset(0, forward) {
                if !self.all.contains(one) {
                    if allowed.contains(one) {
                        self.emit_pawn(from, one, 0);
                    }
                    if from.rank() == start_rank {
                        if let Some(two) = one.offset(0, forward) {
                            if !self.all.contains(two) && allowed.contains(two) {
                                self.emit_pawn(from, two, 0);
                            }
                        }
                    }
                }
            }

            let attacks = attack_tables::pawn_attacks(from, Self::US);
            for to in (attacks & self.enemy & allowed).iter() {
                self.emit_pawn(from, to, FLAG_CAPTURE);
            }

            if !(attacks & ep_target & pin_line).is_empty() && self.en_passant_legal(from) {
                if let Some(to) = ep_target.lsb() {
                    self.emit(from, to, Piece::Pawn, Piece::Pawn, FLAG_CAPTURE | FLAG_EN_PASSANT);
                }
            }
        }
    }

    /// A pawn move, expanded into the four promotions on the last rank
    #[inline]
    fn emit_pawn(&mut self, from: Square, to: Square, flags: u8) {
        if to.rank() == Self::US.promotion_rank() {
            if !S::NEEDS_MOVES {
                self.sink.add_count(PROMOTION_PIECES.len() as u64);
                return;
            }
            for piece in PROMOTION_PIECES {
                self.emit(from, to, Piece::Pawn, piece, flags | FLAG_PROMOTION);
            }
        } else if !S::NEEDS_MOVES {
            self.sink.add_count(1);
        } else {
            self.emit(from, to, Piece::Pawn, Piece::Pawn, flags);
        }
    }

    /// Check rules for an en passant capture by the pawn on `from`.
    ///
    /// The capture must resolve any check, either by landing on a blocking
    /// square or by removing the checking pawn. Taking both pawns off the
    /// board must not open a slider line onto the king; this covers the
    /// shared-rank case that the pin sets cannot see.
    fn en_passant_legal(&self, from: Square) -> bool {
        let target = self.board.en_passant_to;
        let victim = self.board.en_passant_pawn;

        let resolves_check = !(target & self.block_mask).is_empty() || self.checkers.contains(victim);
        if !resolves_check {
            return false;
        }

        let etd = self.board.team(Self::THEM);
        let queens = etd.piece_set(Piece::Queen);
        let straight = etd.piece_set(Piece::Rook) | queens;
        let diagonal = etd.piece_set(Piece::Bishop) | queens;

        let occupancy = (self.all & !from.bit() & !victim.bit()) | target;
        (attack_tables::rook_attacks(self.king, occupancy) & straight).is_empty()
            && (attack_tables::bishop_attacks(self.king, occupancy) & diagonal).is_empty()
    }
}
