//! Butterfly history table.

use crate::board::types::{Color, Move};

/// History bonus per (color, from, to), reset at the start of every
/// iterative-deepening iteration.
#[derive(Clone)]
pub struct ButterflyBoard {
    data: Box<[[[i32; 64]; 64]; 2]>,
}

impl ButterflyBoard {
    #[must_use]
    pub fn new() -> Self {
        ButterflyBoard {
            data: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    pub fn reset(&mut self) {
        for side in self.data.iter_mut() {
            for from in side.iter_mut() {
                from.fill(0);
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, color: Color, mv: Move) -> i32 {
        self.data[color.index()][mv.from().index()][mv.to().index()]
    }

    #[inline]
    pub fn add(&mut self, color: Color, mv: Move, bonus: i32) {
        let slot = &mut self.data[color.index()][mv.from().index()][mv.to().index()];
        *slot = slot.saturating_add(bonus);
    }
}

impl Default for ButterflyBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ButterflyBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ButterflyBoard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_add_and_reset() {
        let board = Board::start_pos();
        let moves = board.generate_moves();
        let mv = moves[0];

        let mut history = ButterflyBoard::new();
        history.add(Color::White, mv, 64);
        history.add(Color::White, mv, 128);
        assert_eq!(history.get(Color::White, mv), 192);
        assert_eq!(history.get(Color::Black, mv), 0);

        history.reset();
        assert_eq!(history.get(Color::White, mv), 0);
    }
}
