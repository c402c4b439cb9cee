//! Pin and check bitboards against brute-force rescans.

use super::{attackers_of, king_attacked, random_walk};
use crate::board::{Bitboard, Board, Color, Piece, Square};

/// Enemy sliders that see `color`'s king through `occupancy`
fn slider_attackers(board: &Board, color: Color, occupancy: Bitboard) -> Bitboard {
    let enemy = board.team(color.opponent());
    let sliders = enemy.piece_set(Piece::Bishop) | enemy.piece_set(Piece::Rook) | enemy.piece_set(Piece::Queen);
    attackers_of(board, board.team(color).king_pos(), color.opponent(), occupancy) & sliders
}

/// Pieces whose removal lets a new slider see `color`'s king
fn brute_force_pins(board: &Board, color: Color) -> Bitboard {
    let king = board.team(color).king_pos();
    let occupancy = board.occupied();
    let before = slider_attackers(board, color, occupancy);

    let mut pinned = Bitboard::EMPTY;
    for sq in occupancy.iter() {
        if sq == king {
            continue;
        }
        let after = slider_attackers(board, color, occupancy & !sq.bit());
        if !(after & !before & !sq.bit()).is_empty() {
            pinned.set(sq, true);
        }
    }
    pinned
}

#[test]
fn test_pins_match_brute_force() {
    for seed in 0..60 {
        for board in random_walk(seed, 100) {
            let to_move = board.turn();
            assert_eq!(
                board.team(to_move).pinned(),
                brute_force_pins(&board, to_move),
                "seed {seed}\n{board}"
            );
        }
    }
}

#[test]
fn test_checkers_match_brute_force() {
    for seed in 200..260 {
        for board in random_walk(seed, 100) {
            let to_move = board.turn();
            let king = board.team(to_move).king_pos();
            let expected = attackers_of(&board, king, to_move.opponent(), board.occupied());
            assert_eq!(board.team(to_move.opponent()).checkers(), expected, "seed {seed}\n{board}");
            assert_eq!(board.in_check(), king_attacked(&board, to_move));
        }
    }
}

#[test]
fn test_generated_moves_never_leave_king_attacked() {
    for seed in 300..330 {
        for board in random_walk(seed, 60) {
            let us = board.turn();
            board.for_each_move(|mv| {
                let mut child = board;
                child.execute_move(mv);
                assert!(!king_attacked(&child, us), "{mv} leaves the king attacked\n{board}");
            });
        }
    }
}

#[test]
fn test_pinned_knight_cannot_move() {
    let board = Board::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").expect("valid FEN");
    let knight = Square(12);
    assert!(board.team(Color::White).pinned().contains(knight));
    assert!(board.generate_moves().iter().all(|mv| mv.from() != knight));
}

#[test]
fn test_pinned_rook_moves_along_pin() {
    let board = Board::from_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1").expect("valid FEN");
    let rook = Square(12);
    let rook_moves: Vec<String> = board
        .generate_moves()
        .iter()
        .filter(|mv| mv.from() == rook)
        .map(|mv| mv.to().to_string())
        .collect();
    assert_eq!(rook_moves, vec!["e3", "e4", "e5", "e6", "e7"]);
}

#[test]
fn test_blockers_of_either_color_are_pinned() {
    let board = Board::from_fen("4k3/8/8/8/4b3/8/8/3KR3 b - - 0 1").expect("valid FEN");
    assert_eq!(board.team(Color::Black).pinned(), Square(28).bit());

    // A white knight shielding the black king is a discovered-check piece
    let board = Board::from_fen("4k3/8/8/8/4N3/8/8/3KR3 b - - 0 1").expect("valid FEN");
    assert_eq!(board.team(Color::Black).pinned(), Square(28).bit());
}
