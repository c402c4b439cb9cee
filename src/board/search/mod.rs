//! Search module implementing negamax alpha-beta with iterative deepening.
//!
//! Features:
//! - Transposition table shortcuts and hash-move ordering
//! - Null move pruning
//! - Check and capture extensions at the horizon
//! - Butterfly history ordering
//!
//! The iterative-deepening loop itself lives in the engine; this module
//! searches one depth at a time.

mod constants;
mod history;
mod negamax;
mod ordering;
mod params;
mod perft;

use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

use super::{Board, Move, MoveList};

pub use constants::{DRAW_SCORE, MATE_VALUE, MAX_EXTENDED_DEPTH, MAX_SEARCH_DEPTH, SCORE_INFINITE};
pub use history::ButterflyBoard;
pub use ordering::{rate_moves, sort_moves};
pub use params::SearchParams;

/// Counters collected while searching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Score of the last completed depth, from White's point of view
    pub eval: i32,
    pub completed_depth: u16,
    pub leaf_nodes_evaluated: u64,
    pub transpos_hits: u64,
    pub transpos_overrides: u64,
    /// Stored best-move indices that no longer fit the regenerated move list
    pub transpos_bad_move_indices: u64,
    pub mates_found: u64,
    pub stalemates_found: u64,
}

/// Everything one search needs, passed down the recursion by reference.
///
/// `frames` holds one move list per ply so no node allocates.
pub struct SearchContext<'a> {
    tt: &'a mut TranspositionTable,
    history: &'a mut ButterflyBoard,
    stop: &'a StopFlag,
    params: SearchParams,
    pub stats: SearchStats,
    frames: Vec<MoveList>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        history: &'a mut ButterflyBoard,
        stop: &'a StopFlag,
        params: SearchParams,
    ) -> Self {
        SearchContext {
            tt,
            history,
            stop,
            params: params.clamped(),
            stats: SearchStats::default(),
            frames: vec![MoveList::new(); constants::MAX_PLY + 1],
        }
    }

    /// Search the root position to a fixed depth and return its score for
    /// the side to move. The best move is left in the transposition table.
    ///
    /// A stopped search returns a meaningless score; callers should check
    /// the stop flag and discard it.
    pub fn search_root(&mut self, board: &Board, depth: u16) -> i32 {
        let depth = depth.clamp(1, MAX_SEARCH_DEPTH);
        self.history.reset();
        let mut root = *board;
        self.negamax(
            &mut root,
            -SCORE_INFINITE,
            SCORE_INFINITE,
            depth,
            self.params.max_extended_depth,
            0,
            true,
        )
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Principal variation from the table this context writes to
    #[must_use]
    pub fn principal_variation(&self, board: &Board, max_len: usize) -> Vec<Move> {
        principal_variation(self.tt, board, max_len)
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

/// Follow best-move indices through the transposition table from `board`.
///
/// Stops at `max_len` moves, at a missing or stale entry, or when a position
/// repeats.
#[must_use]
pub fn principal_variation(tt: &TranspositionTable, board: &Board, max_len: usize) -> Vec<Move> {
    let mut pv = Vec::with_capacity(max_len);
    let mut seen = Vec::with_capacity(max_len);
    let mut position = *board;

    while pv.len() < max_len {
        let hash = position.hash();
        if seen.contains(&hash) {
            break;
        }
        seen.push(hash);

        let Some(entry) = tt.probe(hash) else {
            break;
        };
        let moves = position.generate_moves();
        let Some(mv) = moves.get(usize::from(entry.best_move_index)) else {
            break;
        };
        pv.push(mv);
        position.execute_move(mv);
    }
    pv
}
