use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use super::{EngineSettings, EngineState, PerftReport, SearchInfoCallback, SearchIterationInfo, SearchStatus};
use crate::board::search::{ButterflyBoard, SearchContext, SearchStats, MAX_SEARCH_DEPTH};
use crate::board::{self, Board, Color, Move};
use crate::sync::StopFlag;
use crate::tt::{TranspositionError, TranspositionTable};

/// Stack size for the search thread (32MB for deep recursion)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Observable engine state, copied out under the lock
struct Status {
    state: EngineState,
    position: Board,
    settings: EngineSettings,
    stats: SearchStats,
    pv: Vec<Move>,
}

/// Tables only the running search touches
struct SearchTables {
    tt: TranspositionTable,
    history: ButterflyBoard,
}

struct Shared {
    status: Mutex<Status>,
    tables: Mutex<SearchTables>,
    info_callback: Mutex<Option<SearchInfoCallback>>,
    stop: StopFlag,
}

/// Puts the engine back to `Ready` when dropped, including while a
/// panicking search thread unwinds
struct ReadyGuard<'a>(&'a Engine);

impl Drop for ReadyGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Handle to a chess engine. Clones share the same engine.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    /// Build the lookup tables and allocate the transposition table.
    pub fn try_new(settings: EngineSettings) -> Result<Self, TranspositionError> {
        board::init();
        let tt = TranspositionTable::try_new(settings.tt_megabytes)?;

        let shared = Shared {
            status: Mutex::new(Status {
                state: EngineState::Initializing,
                position: Board::start_pos(),
                settings,
                stats: SearchStats::default(),
                pv: Vec::new(),
            }),
            tables: Mutex::new(SearchTables {
                tt,
                history: ButterflyBoard::new(),
            }),
            info_callback: Mutex::new(None),
            stop: StopFlag::new(),
        };
        shared.status.lock().state = EngineState::Ready;
        info!("engine ready ({} MB transposition table)", settings.tt_megabytes);

        Ok(Engine {
            shared: Arc::new(shared),
        })
    }

    #[must_use]
    pub fn get_state(&self) -> EngineState {
        self.shared.status.lock().state
    }

    /// Replace the position. Ignored while a search is running.
    pub fn set_position(&self, position: Board) -> bool {
        let mut status = self.shared.status.lock();
        if status.state == EngineState::Searching {
            warn!("position change ignored during search");
            return false;
        }
        status.position = position;
        true
    }

    #[must_use]
    pub fn get_position(&self) -> Board {
        self.shared.status.lock().position
    }

    /// Statistics of the current or most recent search
    #[must_use]
    pub fn get_stats(&self) -> SearchStats {
        self.shared.status.lock().stats
    }

    /// Principal variation of the last completed depth
    #[must_use]
    pub fn get_current_pv(&self) -> Vec<Move> {
        self.shared.status.lock().pv.clone()
    }

    #[must_use]
    pub fn settings(&self) -> EngineSettings {
        self.shared.status.lock().settings
    }

    /// Store new settings. A new table size is applied when the next search
    /// starts.
    pub fn set_settings(&self, settings: EngineSettings) {
        self.shared.status.lock().settings = settings;
    }

    pub fn set_info_callback(&self, callback: Option<SearchInfoCallback>) {
        *self.shared.info_callback.lock() = callback;
    }

    /// Empty the transposition table. Waits for a running search to end.
    pub fn clear_transpositions(&self) {
        self.shared.tables.lock().tt.clear();
    }

    /// Ask a running search to stop. Returns immediately.
    pub fn stop_search(&self) {
        let status = self.shared.status.lock();
        if status.state == EngineState::Searching {
            self.shared.stop.stop();
        }
    }

    /// Stop a running search and wait until the engine is ready again
    pub fn stop_search_and_wait(&self) {
        self.stop_search();
        while self.get_state() == EngineState::Searching {
            thread::yield_now();
        }
    }

    /// Iteratively deepen from depth 1 up to `depth` on the calling thread.
    ///
    /// The time limit is checked before each new depth, so the last
    /// iteration may overrun it.
    pub fn do_search(&self, depth: u16, max_time: Option<Duration>) -> SearchStatus {
        if !self.try_begin() {
            return SearchStatus::CouldNotStart;
        }
        let _ready = ReadyGuard(self);
        self.run_search(depth, max_time)
    }

    /// Run [`Engine::do_search`] on a dedicated search thread.
    ///
    /// Returns `Ok(None)` when another search is running. `on_complete`
    /// receives the final status and principal variation after the engine
    /// is ready again.
    pub fn spawn_search<F>(
        &self,
        depth: u16,
        max_time: Option<Duration>,
        on_complete: F,
    ) -> io::Result<Option<JoinHandle<()>>>
    where
        F: FnOnce(SearchStatus, Vec<Move>) + Send + 'static,
    {
        if !self.try_begin() {
            return Ok(None);
        }

        let engine = self.clone();
        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let status = {
                    let _ready = ReadyGuard(&engine);
                    engine.run_search(depth, max_time)
                };
                on_complete(status, engine.get_current_pv());
            });

        match spawned {
            Ok(handle) => Ok(Some(handle)),
            Err(err) => {
                error!("failed to spawn search thread: {err}");
                self.finish();
                Err(err)
            }
        }
    }

    /// Count leaf nodes below every root move of the current position.
    ///
    /// Depth 0 counts the position itself and lists no moves.
    pub fn do_perft_search(&self, depth: u16) -> PerftReport {
        if !self.try_begin() {
            return PerftReport {
                status: SearchStatus::CouldNotStart,
                per_move: Vec::new(),
                total: 0,
                elapsed: Duration::ZERO,
            };
        }

        let _ready = ReadyGuard(self);
        let position = self.get_position();
        let start = Instant::now();
        let per_move = position.perft_divide_until(depth, &self.shared.stop);
        let elapsed = start.elapsed();
        let total = if depth == 0 {
            1
        } else {
            per_move.iter().map(|(_, nodes)| nodes).sum()
        };
        let status = if self.shared.stop.is_stopped() {
            SearchStatus::Interrupted
        } else {
            SearchStatus::Completed
        };

        for (mv, nodes) in &per_move {
            debug!("perft {mv}: {nodes}");
        }
        info!("perft depth {depth}: {total} nodes in {}ms", elapsed.as_millis());

        PerftReport {
            status,
            per_move,
            total,
            elapsed,
        }
    }

    /// Ready -> Searching, clearing the previous results
    fn try_begin(&self) -> bool {
        let mut status = self.shared.status.lock();
        if status.state != EngineState::Ready {
            return false;
        }
        status.state = EngineState::Searching;
        status.stats = SearchStats::default();
        status.pv.clear();
        self.shared.stop.reset();
        true
    }

    fn finish(&self) {
        self.shared.status.lock().state = EngineState::Ready;
    }

    fn run_search(&self, depth: u16, max_time: Option<Duration>) -> SearchStatus {
        let start = Instant::now();
        let (position, settings) = {
            let status = self.shared.status.lock();
            (status.position, status.settings)
        };
        let depth = depth.clamp(1, MAX_SEARCH_DEPTH);

        let mut tables = self.shared.tables.lock();
        if tables.tt.megabytes() != settings.tt_megabytes {
            match TranspositionTable::try_new(settings.tt_megabytes) {
                Ok(tt) => {
                    info!("transposition table resized to {} MB", settings.tt_megabytes);
                    tables.tt = tt;
                }
                Err(err) => error!("{err}; keeping {} MB table", tables.tt.megabytes()),
            }
        }
        let SearchTables { tt, history } = &mut *tables;
        tt.mark_old();

        if position.count_moves() == 0 {
            debug!("no legal moves at the root");
            return SearchStatus::Completed;
        }

        let callback = self.shared.info_callback.lock().clone();
        let mut ctx = SearchContext::new(tt, history, &self.shared.stop, settings.search_params());

        for current in 1..=depth {
            if let Some(limit) = max_time {
                if start.elapsed() >= limit {
                    debug!("time limit reached before depth {current}");
                    break;
                }
            }

            let score = ctx.search_root(&position, current);
            if ctx.is_stopped() {
                debug!("search stopped during depth {current}");
                return SearchStatus::Interrupted;
            }

            let pv = ctx.principal_variation(&position, usize::from(current));
            let eval = match position.turn() {
                Color::White => score,
                Color::Black => -score,
            };
            let stats = SearchStats {
                eval,
                completed_depth: current,
                ..ctx.stats
            };
            {
                let mut status = self.shared.status.lock();
                status.stats = stats;
                status.pv.clone_from(&pv);
            }

            let elapsed = start.elapsed();
            let time_ms = elapsed.as_millis() as u64;
            let nodes = stats.leaf_nodes_evaluated;
            let nps = (nodes as f64 / elapsed.as_secs_f64().max(0.001)) as u64;
            let line = pv.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
            info!("depth {current} score {score} nodes {nodes} nps {nps} time {time_ms} pv {line}");
            debug!(
                "tt hits {} overrides {} bad indices {} mates {} stalemates {}",
                stats.transpos_hits,
                stats.transpos_overrides,
                stats.transpos_bad_move_indices,
                stats.mates_found,
                stats.stalemates_found
            );

            if let Some(callback) = &callback {
                callback(&SearchIterationInfo {
                    depth: current,
                    score,
                    nodes,
                    nps,
                    time_ms,
                    hashfull: ctx.hashfull_per_mille(),
                    pv,
                });
            }
        }

        SearchStatus::Completed
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.shared.status.lock();
        f.debug_struct("Engine")
            .field("state", &status.state)
            .field("settings", &status.settings)
            .field("stats", &status.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine() -> Engine {
        Engine::try_new(EngineSettings::default().with_tt_megabytes(1)).expect("engine")
    }

    #[test]
    fn test_new_engine_is_ready_at_start_position() {
        let engine = small_engine();
        assert_eq!(engine.get_state(), EngineState::Ready);
        assert_eq!(engine.get_position().to_fen(), crate::board::START_FEN);
        assert!(engine.get_current_pv().is_empty());
    }

    #[test]
    fn test_search_records_stats_and_pv() {
        let engine = small_engine();
        assert_eq!(engine.do_search(3, None), SearchStatus::Completed);
        let stats = engine.get_stats();
        assert_eq!(stats.completed_depth, 3);
        assert!(stats.leaf_nodes_evaluated > 0);
        let pv = engine.get_current_pv();
        assert!(!pv.is_empty());
        assert!(engine.get_position().generate_moves().contains(&pv[0]));
        assert_eq!(engine.get_state(), EngineState::Ready);
    }

    #[test]
    fn test_second_search_cannot_start() {
        let engine = small_engine();
        assert!(engine.try_begin());
        assert_eq!(engine.do_search(1, None), SearchStatus::CouldNotStart);
        assert_eq!(engine.do_perft_search(1).status, SearchStatus::CouldNotStart);
        assert!(!engine.set_position(Board::start_pos()));
        engine.finish();
        assert_eq!(engine.do_search(1, None), SearchStatus::Completed);
    }

    #[test]
    fn test_panicking_search_leaves_engine_ready() {
        let engine = small_engine();
        let callback: SearchInfoCallback = Arc::new(|_: &SearchIterationInfo| panic!("callback failed"));
        engine.set_info_callback(Some(callback));

        let handle = engine
            .spawn_search(3, None, |_, _| unreachable!("search thread panicked"))
            .expect("spawn")
            .expect("engine was ready");
        assert!(handle.join().is_err());
        assert_eq!(engine.get_state(), EngineState::Ready);

        engine.set_info_callback(None);
        assert_eq!(engine.do_search(2, None), SearchStatus::Completed);
    }

    #[test]
    fn test_perft_depth_zero_counts_the_root() {
        let report = small_engine().do_perft_search(0);
        assert_eq!(report.status, SearchStatus::Completed);
        assert_eq!(report.total, 1);
        assert!(report.per_move.is_empty());
    }

    #[test]
    fn test_table_resize_applies_on_next_search() {
        let engine = small_engine();
        engine.set_settings(EngineSettings::default().with_tt_megabytes(2));
        assert_eq!(engine.shared.tables.lock().tt.megabytes(), 1);
        engine.do_search(1, None);
        assert_eq!(engine.shared.tables.lock().tt.megabytes(), 2);
    }

    #[test]
    fn test_zero_time_limit_completes_nothing() {
        let engine = small_engine();
        assert_eq!(engine.do_search(10, Some(Duration::ZERO)), SearchStatus::Completed);
        assert_eq!(engine.get_stats().completed_depth, 0);
    }
}
