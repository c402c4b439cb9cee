use crate::board::search::MATE_VALUE;
use crate::board::Move;
use crate::engine::{PerftReport, SearchIterationInfo};

/// `score cp N` or `score mate N`.
///
/// Mate scores carry the remaining depth of the mated node, so the move
/// count is derived from the iteration depth and can be off when
/// extensions fired.
#[must_use]
pub fn format_score(score: i32, depth: u16) -> String {
    if score.abs() < MATE_VALUE {
        return format!("score cp {score}");
    }
    let plies = (i32::from(depth) - (score.abs() - MATE_VALUE)).max(1);
    let moves = (plies + 1) / 2;
    format!("score mate {}", if score > 0 { moves } else { -moves })
}

#[must_use]
pub fn format_info(info: &SearchIterationInfo) -> String {
    let mut line = format!(
        "info depth {} {} nodes {} nps {} time {} hashfull {}",
        info.depth,
        format_score(info.score, info.depth),
        info.nodes,
        info.nps,
        info.time_ms,
        info.hashfull
    );
    if !info.pv.is_empty() {
        line.push_str(" pv");
        for mv in &info.pv {
            line.push(' ');
            line.push_str(&mv.to_string());
        }
    }
    line
}

/// `bestmove` line; `0000` when there is nothing to play
#[must_use]
pub fn format_bestmove(best_move: Option<Move>) -> String {
    match best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

/// Perft output: one `move: count` line per root move, the total, the time
/// and, for runs of at least 500ms, nodes per second
#[must_use]
pub fn format_perft(report: &PerftReport) -> Vec<String> {
    report.to_string().lines().map(str::to_string).collect()
}
