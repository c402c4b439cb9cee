//! Hand-picked positions exercising check, pin, castling, en passant and
//! promotion rules.

use crate::board::attack_tables;
use crate::board::search::{principal_variation, ButterflyBoard, SearchContext, SearchParams};
use crate::board::{Board, Color, Piece, Square};
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

fn play(board: &mut Board, moves: &[&str]) {
    for text in moves {
        let mv = board.parse_move(text).expect("legal move");
        board.execute_move(mv);
    }
}

#[test]
fn test_open_game_scenario() {
    let mut board = Board::start_pos();
    play(&mut board, &["e2e4", "e7e5", "g1f3"]);

    assert_eq!(board.turn(), Color::Black);
    for color in Color::BOTH {
        assert!(board.team(color).pinned().is_empty());
        assert!(board.team(color).checkers().is_empty());
    }
    assert!(board.en_passant_mask().is_empty());

    let mut tt = TranspositionTable::try_new(1).expect("alloc");
    let mut history = ButterflyBoard::new();
    let stop = StopFlag::new();
    let mut ctx = SearchContext::new(&mut tt, &mut history, &stop, SearchParams::default());
    ctx.search_root(&board, 1);
    let leaves = ctx.stats.leaf_nodes_evaluated;
    assert_eq!(leaves, board.count_moves());

    let pv = principal_variation(&tt, &board, 1);
    assert_eq!(pv.len(), 1);
    assert!(board.generate_moves().contains(&pv[0]));
}

#[test]
fn test_single_rook_check_restricts_moves() {
    let board = Board::from_fen("4k3/8/8/8/8/2N5/8/r3K2R w K - 0 1").expect("valid FEN");
    let king = board.team(Color::White).king_pos();
    let checker = Square(0);
    assert!(board.in_check());
    assert_eq!(board.team(Color::Black).first_checker(), Some(checker));

    let allowed = attack_tables::between(checker, king) | checker.bit();
    let moves = board.generate_moves();
    let blocks: Vec<_> = moves.iter().filter(|mv| mv.from() != king).collect();
    assert_eq!(blocks.len(), 2);
    for mv in blocks {
        assert!(allowed.contains(mv.to()), "{mv} does not answer the check");
    }
    assert!(moves.iter().all(|mv| !mv.is_castle()));
}

#[test]
fn test_double_check_allows_only_king_moves() {
    // Rook e8 and bishop b4 both give check
    let board = Board::from_fen("k3r3/8/8/8/1b6/8/8/4K1N1 w - - 0 1").expect("valid FEN");
    assert_eq!(board.team(Color::Black).checkers().popcount(), 2);
    let king = board.team(Color::White).king_pos();
    let moves = board.generate_moves();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|mv| mv.from() == king));
}

#[test]
fn test_en_passant_cannot_expose_king_on_rank() {
    let board = Board::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").expect("valid FEN");
    assert!(board.generate_moves().iter().all(|mv| !mv.is_en_passant()));

    // Without the rook the capture is fine
    let board = Board::from_fen("8/8/8/KPp5/8/8/8/7k w - c6 0 1").expect("valid FEN");
    assert!(board.generate_moves().iter().any(|mv| mv.is_en_passant()));
}

#[test]
fn test_en_passant_removes_checking_pawn() {
    // The pawn that just double-stepped gives check and can be taken en passant
    let board = Board::from_fen("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1").expect("valid FEN");
    assert!(board.in_check());
    let ep: Vec<_> = board.generate_moves().iter().filter(|mv| mv.is_en_passant()).copied().collect();
    assert_eq!(ep.len(), 1);

    let mut after = board;
    after.execute_move(ep[0]);
    assert_eq!(after.piece_at(Square(27)), None);
    assert_eq!(after.piece_at(Square(19)), Some((Color::Black, Piece::Pawn)));
}

#[test]
fn test_castling_through_attack_is_refused() {
    // The rook on f2 covers f1
    let board = Board::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").expect("valid FEN");
    let castles: Vec<String> = board
        .generate_moves()
        .iter()
        .filter(|mv| mv.is_castle())
        .map(|mv| mv.to_string())
        .collect();
    assert_eq!(castles, vec!["e1c1"]);
}

#[test]
fn test_castling_needs_empty_path() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").expect("valid FEN");
    assert!(board.generate_moves().iter().all(|mv| !mv.is_castle()));
}

#[test]
fn test_promotions_expand_to_four() {
    let board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").expect("valid FEN");
    let promos: Vec<Piece> = board
        .generate_moves()
        .iter()
        .filter_map(|mv| mv.promotion())
        .collect();
    assert_eq!(promos, vec![Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]);
    assert_eq!(board.count_moves(), board.generate_moves().len() as u64);
}

#[test]
fn test_checkmate_and_stalemate_have_no_moves() {
    let mate = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").expect("valid FEN");
    assert!(mate.in_check());
    assert_eq!(mate.count_moves(), 0);

    let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
    assert!(!stalemate.in_check());
    assert_eq!(stalemate.count_moves(), 0);
}

#[test]
fn test_start_position_evaluates_level() {
    let mut board = Board::start_pos();
    assert_eq!(board.evaluate(), 0);
    assert!(!board.is_endgame());
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN").is_endgame());
}
