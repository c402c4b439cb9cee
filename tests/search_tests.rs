//! Search tests to verify the engine finds correct moves in various positions.

use bitmouse::board::search::MATE_VALUE;
use bitmouse::board::Board;
use bitmouse::engine::{Engine, EngineSettings, EngineState, SearchStatus};

fn engine_at(fen: &str) -> Engine {
    let engine = Engine::try_new(EngineSettings::default().with_tt_megabytes(4)).expect("engine");
    assert!(engine.set_position(Board::from_fen(fen).expect("valid FEN")));
    engine
}

fn best_move(engine: &Engine, depth: u16) -> String {
    assert_eq!(engine.do_search(depth, None), SearchStatus::Completed);
    engine.get_current_pv().first().expect("a best move").to_string()
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    let engine = engine_at("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    assert_eq!(best_move(&engine, 3), "e1e8", "Should find Qe8# (back rank mate)");
    assert!(engine.get_stats().eval > 900_000);
}

/// With a mate in 1 and slower mates on the board, the shortest one wins
#[test]
fn prefers_the_shorter_mate() {
    // Rb8# mates at once; most other rook moves still mate a move later
    let engine = engine_at("7k/R7/8/8/8/8/8/1R5K w - - 0 1");
    assert_eq!(best_move(&engine, 4), "b1b8");
    // Mated with three plies of depth left: the mate came on the first move
    assert_eq!(engine.get_stats().eval, MATE_VALUE + 3);
    assert_eq!(engine.get_current_pv().len(), 1);
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    let engine = engine_at("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");
    assert_eq!(best_move(&engine, 3), "h5f7", "Should find Qxf7# (scholar's mate)");
}

/// Test that the engine takes an undefended queen
#[test]
fn captures_free_piece() {
    let engine = engine_at("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    assert_eq!(best_move(&engine, 4), "d2d5");
}

#[test]
fn single_legal_move() {
    // Kxb2 is the only way out of the rook check
    let engine = engine_at("k7/8/8/8/8/8/1r6/K1r5 w - - 0 1");
    assert_eq!(engine.get_position().count_moves(), 1);
    assert_eq!(best_move(&engine, 4), "a1b2");
}

#[test]
fn no_move_in_checkmate_or_stalemate() {
    for fen in [
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        let engine = engine_at(fen);
        assert_eq!(engine.do_search(4, None), SearchStatus::Completed);
        assert!(engine.get_current_pv().is_empty());
        assert_eq!(engine.get_stats().completed_depth, 0);
        assert_eq!(engine.get_state(), EngineState::Ready);
    }
}

#[test]
fn eval_is_reported_from_whites_side() {
    // White is a queen up; black to move
    let engine = engine_at("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
    assert_eq!(engine.do_search(3, None), SearchStatus::Completed);
    assert!(engine.get_stats().eval > 500, "eval {}", engine.get_stats().eval);
}

#[test]
fn search_is_deterministic() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let first = engine_at(fen);
    let second = engine_at(fen);
    first.do_search(4, None);
    second.do_search(4, None);
    assert_eq!(first.get_current_pv(), second.get_current_pv());
    assert_eq!(first.get_stats(), second.get_stats());
}
