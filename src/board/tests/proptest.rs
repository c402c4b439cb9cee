//! Property-based tests using proptest.

use super::{king_attacked, random_walk};
use crate::board::{Bitboard, Board};
use proptest::prelude::*;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

proptest! {
    /// Property: deposit undoes extract for any board and mask
    #[test]
    fn prop_extract_deposit_inverse(bits in any::<u64>(), mask in any::<u64>()) {
        let board = Bitboard(bits);
        let mask = Bitboard(mask);
        let dense = board.extract_bits(mask);
        prop_assert_eq!(Bitboard::deposit_bits(dense, mask), board & mask);
        if mask.popcount() < 64 {
            prop_assert_eq!(dense >> mask.popcount(), 0);
        }
    }

    /// Property: hash is always consistent with recomputed hash
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_walk(seed, num_moves) {
            prop_assert_eq!(board.hash(), board.compute_hash());
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let positions = random_walk(seed, num_moves);
        let board = positions[positions.len() - 1];

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen).expect("own FEN parses");

        prop_assert_eq!(board.hash(), restored.hash());
        prop_assert_eq!(board.turn(), restored.turn());
        prop_assert_eq!(board.en_passant_mask(), restored.en_passant_mask());
        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(board.count_moves(), restored.count_moves());
    }

    /// Property: legal moves are always legal (no self-check)
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_walk(seed, num_moves) {
            let us = board.turn();
            for mv in board.generate_moves().iter() {
                let mut child = board;
                child.execute_move(*mv);
                prop_assert!(!king_attacked(&child, us), "Legal move left king in check: {:?}", mv);
            }
        }
    }

    /// Property: all three generation modes agree
    #[test]
    fn prop_sinks_agree(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_walk(seed, num_moves) {
            let listed = board.generate_moves();
            let mut called = Vec::new();
            board.for_each_move(|mv| called.push(mv));

            prop_assert_eq!(listed.as_slice(), called.as_slice());
            prop_assert_eq!(board.count_moves(), listed.len() as u64);
        }
    }
}
