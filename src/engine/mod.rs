//! Thread-safe engine facade.
//!
//! The engine owns the current position, the transposition table and the
//! search statistics. Everything a caller can observe sits behind one mutex
//! and is copied out on access; the stop flag is a separate atomic so the
//! search can poll it at every node.
//!
//! State machine: `Initializing -> Ready -> Searching -> Ready`. Only one
//! search or perft runs at a time.

mod controller;
mod settings;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::board::Move;

pub use crate::board::search::SearchStats;
pub use controller::Engine;
pub use settings::EngineSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Initializing,
    Ready,
    Searching,
}

/// Outcome of a search or perft request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// Another search was already running; nothing was disturbed
    CouldNotStart,
    /// Stopped early; results are from the last completed depth
    Interrupted,
    Completed,
}

/// Published after every completed iterative-deepening depth
#[derive(Clone, Debug)]
pub struct SearchIterationInfo {
    pub depth: u16,
    /// Score for the side to move
    pub score: i32,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub hashfull: u32,
    pub pv: Vec<Move>,
}

/// Called on the search thread after each completed depth
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Per-root-move leaf counts from a perft run
#[derive(Clone, Debug)]
pub struct PerftReport {
    pub status: SearchStatus,
    pub per_move: Vec<(Move, u64)>,
    pub total: u64,
    pub elapsed: Duration,
}

impl PerftReport {
    /// Nodes per second, when enough time passed to measure it
    #[must_use]
    pub fn nps(&self) -> Option<u64> {
        let ms = self.elapsed.as_millis();
        if ms < 500 {
            None
        } else {
            Some((u128::from(self.total) * 1000 / ms) as u64)
        }
    }
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mv, nodes) in &self.per_move {
            writeln!(f, "{mv}: {nodes}")?;
        }
        writeln!(f)?;
        writeln!(f, "Nodes searched: {}", self.total)?;
        let ms = self.elapsed.as_millis();
        if ms < 10_000 {
            writeln!(f, "Time: {ms}ms")?;
        } else {
            writeln!(f, "Time: {:.2}s", self.elapsed.as_secs_f64())?;
        }
        match self.nps() {
            Some(nps) => write!(f, "Nodes per second: {nps} ({:.3} mnps)", nps as f64 / 1e6),
            None => write!(f, "Nodes per second: insufficient sample size (min = 500ms)"),
        }
    }
}
