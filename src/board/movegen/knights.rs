use super::{Generator, MoveSink};
use crate::board::attack_tables;
use crate::board::types::Piece;

impl<S: MoveSink, const WHITE: bool> Generator<'_, S, WHITE> {
    pub(super) fn knight_moves(&mut self) {
        // A pinned knight can never stay on its pin line
        let knights = self.pieces(Piece::Knight) & !self.pinned;
        for from in knights.iter() {
            let targets = attack_tables::knight_moves(from) & !self.own & self.block_mask;
            self.emit_targets(from, Piece::Knight, targets);
        }
    }
}
