use log::warn;

use super::constants::{BUTTERFLY_ALPHA_BEST, BUTTERFLY_BETA_CUTOFF, DRAW_SCORE, MATE_VALUE};
use super::ordering::{rate_moves, sort_moves};
use super::SearchContext;
use crate::board::Board;
use crate::tt::TransposEntry;

/// Passing is unsound at the root, in check, and in queenless endings where
/// zugzwang is common. The reduced search also needs depth left over.
fn null_move_applies(board: &Board, depth: u16, reduction: u16, root: bool) -> bool {
    !root && depth > reduction && !board.in_check() && !board.is_endgame()
}

impl SearchContext<'_> {
    /// Negamax alpha-beta. Returns a score for the side to move, clamped to
    /// the `(alpha, beta)` window on cutoffs.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn negamax(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        depth: u16,
        extended: u16,
        ply: usize,
        null_allowed: bool,
    ) -> i32 {
        if self.stop.is_stopped() {
            return alpha;
        }

        let root = ply == 0;
        if !root && board.is_fifty_move_draw() {
            return DRAW_SCORE;
        }

        let hash = board.hash();
        let entry = self.tt.probe(hash);
        if entry.is_some() {
            self.stats.transpos_hits += 1;
        }

        // A result at least as deep as ours settles the node when it fails
        // high or lands inside the window
        if let Some(entry) = entry.filter(|e| !root && e.depth >= depth) {
            if entry.eval >= beta {
                self.stats.transpos_overrides += 1;
                return beta;
            }
            if entry.eval > alpha {
                self.stats.transpos_overrides += 1;
                return entry.eval;
            }
        }

        if depth == 0 {
            self.stats.leaf_nodes_evaluated += 1;
            return board.evaluate();
        }

        board.generate_moves_into(&mut self.frames[ply]);
        let move_count = self.frames[ply].len();
        if move_count == 0 {
            return if board.in_check() {
                self.stats.mates_found += 1;
                -(MATE_VALUE + i32::from(depth))
            } else {
                self.stats.stalemates_found += 1;
                DRAW_SCORE
            };
        }

        let reduction = self.params.null_move_reduction;
        if null_allowed && null_move_applies(board, depth, reduction, root) {
            let mut passed = *board;
            passed.execute_null_move();
            let eval = -self.negamax(
                &mut passed,
                -beta,
                -beta + 1,
                depth - 1 - reduction,
                extended,
                ply + 1,
                false,
            );
            if self.stop.is_stopped() {
                return alpha;
            }
            if eval >= beta {
                return beta;
            }
        }

        let hash_move = entry.and_then(|e| {
            if usize::from(e.best_move_index) < move_count {
                Some(e.best_move_index)
            } else {
                self.stats.transpos_bad_move_indices += 1;
                warn!(
                    "transposition entry {hash:016x} names move {} of {move_count}, ignoring it",
                    e.best_move_index
                );
                None
            }
        });

        rate_moves(board, &*self.history, self.frames[ply].as_mut_slice());
        sort_moves(self.frames[ply].as_mut_slice());

        // The hash move is re-queued at the end so it is searched first; its
        // sorted copy is skipped below
        if let Some(index) = hash_move {
            let frame = &mut self.frames[ply];
            if let Some(mv) = frame.iter().copied().find(|m| m.true_index() == index) {
                frame.push(mv);
            }
        }

        let us = board.turn();
        let window = self.params.butterfly_depth_window;
        let total = self.frames[ply].len();
        let mut best_index = None;
        let mut first_index = None;

        for i in (0..total).rev() {
            let mv = self.frames[ply][i];
            if hash_move.is_some() && i + 1 != total && Some(mv.true_index()) == hash_move {
                continue;
            }

            let mut child = *board;
            child.execute_move(mv);

            let (next_depth, next_extended) =
                if depth == 1 && extended > 0 && (child.in_check() || mv.is_capture()) {
                    (depth, extended - 1)
                } else {
                    (depth - 1, extended)
                };

            let eval = -self.negamax(&mut child, -beta, -alpha, next_depth, next_extended, ply + 1, true);
            if self.stop.is_stopped() {
                return alpha;
            }
            first_index.get_or_insert(mv.true_index());

            if eval >= beta {
                if depth <= window {
                    self.history.add(us, mv, BUTTERFLY_BETA_CUTOFF);
                }
                return beta;
            }
            if eval > alpha {
                alpha = eval;
                best_index = Some(mv.true_index());
                if depth <= window {
                    self.history.add(us, mv, BUTTERFLY_ALPHA_BEST);
                }
            }
        }

        self.tt.store(TransposEntry {
            hash,
            eval: alpha,
            depth,
            best_move_index: best_index.or(first_index).unwrap_or(0),
        });
        alpha
    }
}
