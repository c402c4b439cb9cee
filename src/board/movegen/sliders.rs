use super::{Generator, MoveSink};
use crate::board::attack_tables;
use crate::board::types::Piece;

impl<S: MoveSink, const WHITE: bool> Generator<'_, S, WHITE> {
    pub(super) fn slider_moves(&mut self, piece: Piece) {
        for from in self.pieces(piece).iter() {
            let attacks = match piece {
                Piece::Bishop => attack_tables::bishop_attacks(from, self.all),
                Piece::Rook => attack_tables::rook_attacks(from, self.all),
                Piece::Queen => attack_tables::queen_attacks(from, self.all),
                _ => continue,
            };
            let targets = self.pin_filter(from, attacks & !self.own & self.block_mask);
            self.emit_targets(from, piece, targets);
        }
    }
}
