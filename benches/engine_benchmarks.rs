//! Benchmarks for chess engine performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bitmouse::board::search::{ButterflyBoard, SearchContext, SearchParams};
use bitmouse::board::Board;
use bitmouse::sync::StopFlag;
use bitmouse::tt::TranspositionTable;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn position(fen: &str) -> Board {
    Board::from_fen(fen).expect("benchmark FEN")
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let board = Board::start_pos();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    let kiwipete = position(KIWIPETE);
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, board) in [
        ("startpos", Board::start_pos()),
        ("middlegame", position(MIDDLEGAME)),
        ("kiwipete", position(KIWIPETE)),
    ] {
        group.bench_function(BenchmarkId::new("list", name), |b| {
            b.iter(|| black_box(board.generate_moves()))
        });
        group.bench_function(BenchmarkId::new("count", name), |b| {
            b.iter(|| black_box(board.count_moves()))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    let stop = StopFlag::new();
    let mut tt = TranspositionTable::try_new(16).expect("table");
    let mut history = ButterflyBoard::new();

    for (name, fen, depths) in [
        ("startpos", bitmouse::board::START_FEN, &[3u16, 4, 5][..]),
        (
            "tactical",
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
            &[3, 4][..],
        ),
    ] {
        let board = position(fen);
        for &depth in depths {
            group.bench_with_input(BenchmarkId::new(name, depth), &depth, |b, &depth| {
                b.iter(|| {
                    tt.clear();
                    let mut ctx = SearchContext::new(&mut tt, &mut history, &stop, SearchParams::default());
                    ctx.search_root(&board, depth)
                })
            });
        }
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", bitmouse::board::START_FEN),
        ("middlegame", MIDDLEGAME),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let board = position(fen);
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| {
                let mut board = *board;
                black_box(board.evaluate())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
