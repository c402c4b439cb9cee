//! Move rating and ordering.
//!
//! The search walks its move list from the back, so better moves must sort
//! toward the end.

use super::constants::CAPTURE_BONUS;
use super::history::ButterflyBoard;
use crate::board::attack_tables;
use crate::board::types::{Move, Piece};
use crate::board::Board;

/// Give every move a heuristic rating for the side to move.
pub fn rate_moves(board: &Board, history: &ButterflyBoard, moves: &mut [Move]) {
    let us = board.turn();
    let etd = board.team(us.opponent());
    let endgame = board.is_endgame();

    for mv in moves {
        let mut rating = 0;

        if mv.is_capture() || mv.promotion() == Some(Piece::Queen) {
            rating += CAPTURE_BONUS;
        }

        if etd.occupy().contains(mv.to()) {
            rating += board.piece_value_at(mv.to());
            // The mover will probably be lost in the exchange
            if etd.attack().contains(mv.to()) {
                rating -= board.piece_value_at(mv.from());
            }
        }

        let piece = mv.original_piece();
        rating += attack_tables::piece_value(piece, mv.to(), us, endgame)
            - attack_tables::piece_value(piece, mv.from(), us, endgame);

        rating += history.get(us, *mv);

        mv.rating = rating.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
    }
}

/// Stable insertion sort, ascending by rating.
///
/// Lists are short and close to sorted between iterations.
pub fn sort_moves(moves: &mut [Move]) {
    for i in 1..moves.len() {
        let mv = moves[i];
        let mut j = i;
        while j > 0 && moves[j - 1].rating > mv.rating {
            moves[j] = moves[j - 1];
            j -= 1;
        }
        moves[j] = mv;
    }
}
