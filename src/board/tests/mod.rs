//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move counts against reference values
//! - `round_trip.rs` - Incremental state against a full rebuild
//! - `pins.rs` - Pins and checks against brute-force rescans
//! - `scenarios.rs` - Hand-picked positions with tricky rules
//! - `proptest.rs` - Property-based tests

mod pins;
mod proptest;
mod scenarios;

use rand::prelude::*;

use super::attack_tables;
use super::{Bitboard, Board, Color, Piece, Square};

/// Pieces of `by` attacking `sq`, computed from scratch
pub(super) fn attackers_of(board: &Board, sq: Square, by: Color, occupancy: Bitboard) -> Bitboard {
    let team = board.team(by);
    let rooks = team.piece_set(Piece::Rook) | team.piece_set(Piece::Queen);
    let bishops = team.piece_set(Piece::Bishop) | team.piece_set(Piece::Queen);

    (attack_tables::pawn_attacks(sq, by.opponent()) & team.piece_set(Piece::Pawn))
        | (attack_tables::knight_moves(sq) & team.piece_set(Piece::Knight))
        | (attack_tables::king_moves(sq) & team.piece_set(Piece::King))
        | (attack_tables::rook_attacks(sq, occupancy) & rooks)
        | (attack_tables::bishop_attacks(sq, occupancy) & bishops)
}

/// Whether `color`'s king is attacked, ignoring all cached state
pub(super) fn king_attacked(board: &Board, color: Color) -> bool {
    let king = board.team(color).king_pos();
    !attackers_of(board, king, color.opponent(), board.occupied()).is_empty()
}

/// Positions along a seeded random game, starting position first
pub(super) fn random_walk(seed: u64, plies: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::start_pos();
    let mut positions = vec![board];
    for _ in 0..plies {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.execute_move(mv);
        positions.push(board);
    }
    positions
}
