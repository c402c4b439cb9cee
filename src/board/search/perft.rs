//! Move-count verification.

use crate::board::{Board, Move};
use crate::sync::StopFlag;

impl Board {
    /// Count leaf positions `depth` plies below this one.
    ///
    /// The last ply is counted without building moves.
    #[must_use]
    pub fn perft(&self, depth: u16) -> u64 {
        self.perft_until(depth, &StopFlag::new())
    }

    /// `perft` that gives up as soon as `stop` is set. The count of an
    /// interrupted run is partial.
    pub(crate) fn perft_until(&self, depth: u16, stop: &StopFlag) -> u64 {
        if stop.is_stopped() {
            return 0;
        }
        match depth {
            0 => 1,
            1 => self.count_moves(),
            _ => {
                let mut total = 0;
                self.for_each_move(|mv| {
                    if stop.is_stopped() {
                        return;
                    }
                    let mut child = *self;
                    child.execute_move(mv);
                    total += child.perft_until(depth - 1, stop);
                });
                total
            }
        }
    }

    /// Per-root-move leaf counts, in generation order. Empty at depth 0.
    #[must_use]
    pub fn perft_divide(&self, depth: u16) -> Vec<(Move, u64)> {
        self.perft_divide_until(depth, &StopFlag::new())
    }

    /// `perft_divide` that returns the root moves finished so far once
    /// `stop` is set. A root move cut off midway is left out.
    pub(crate) fn perft_divide_until(&self, depth: u16, stop: &StopFlag) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for &mv in &moves {
            let mut child = *self;
            child.execute_move(mv);
            let nodes = child.perft_until(depth - 1, stop);
            if stop.is_stopped() {
                break;
            }
            counts.push((mv, nodes));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_shallow() {
        let board = Board::start_pos();
        assert_eq!(board.perft(0), 1);
        assert_eq!(board.perft(1), 20);
        assert_eq!(board.perft(2), 400);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let board = Board::start_pos();
        let divide = board.perft_divide(3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8902);
        assert!(divide.iter().all(|&(_, n)| n > 0));
    }

    #[test]
    fn test_divide_at_depth_zero_is_empty() {
        assert!(Board::start_pos().perft_divide(0).is_empty());
        assert_eq!(Board::start_pos().perft_divide(1).len(), 20);
    }

    #[test]
    fn test_divide_honours_stop() {
        let stop = StopFlag::new();
        stop.stop();
        assert!(Board::start_pos().perft_divide_until(2, &stop).is_empty());
    }

    #[test]
    fn test_stopped_perft_returns_at_once() {
        let stop = StopFlag::new();
        stop.stop();
        // Would take minutes if the flag were only read at the root
        assert_eq!(Board::start_pos().perft_until(9, &stop), 0);
    }
}
