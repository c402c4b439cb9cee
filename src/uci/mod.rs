//! Universal Chess Interface (UCI) protocol front end.
//!
//! Reads commands line by line and drives an [`Engine`]. Searches run on the
//! engine's search thread, so `stop` and `isready` are answered while the
//! engine thinks.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, warn};
use parking_lot::Mutex;

use crate::board::search::MAX_SEARCH_DEPTH;
use crate::board::{Board, FenError, MoveParseError};
use crate::engine::{Engine, SearchIterationInfo, SearchStatus};

mod command;
mod options;
mod report;

pub use command::{parse_uci_command, GoParams, UciCommand, DEFAULT_MOVES_TO_GO};
pub use options::{apply_setoption, option_lines, parse_setoption, MAX_HASH_MB};
pub use report::{format_bestmove, format_info, format_perft, format_score};

/// Depth of a plain `go` with no limits
pub const DEFAULT_GO_DEPTH: u16 = 6;

pub const ENGINE_NAME: &str = "bitmouse";
pub const ENGINE_AUTHOR: &str = "the bitmouse developers";

/// Error type for UCI position command parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in the move list
    InvalidMove { move_str: String, error: MoveParseError },
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::MissingParts => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse `position startpos|fen <fields> [moves <m1> <m2> ...]`.
///
/// The FEN runs up to the `moves` keyword, so the two counters may be left
/// out.
pub fn parse_position_command<S: AsRef<str>>(parts: &[S]) -> Result<Board, UciError> {
    let parts: Vec<&str> = parts.iter().map(AsRef::as_ref).collect();
    let moves_at = parts.iter().position(|p| *p == "moves").unwrap_or(parts.len());

    let mut board = match parts.get(1).copied() {
        Some("startpos") => Board::start_pos(),
        Some("fen") if moves_at > 2 => Board::from_fen(&parts[2..moves_at].join(" "))?,
        _ => return Err(UciError::MissingParts),
    };

    for text in parts.iter().skip(moves_at + 1) {
        let mv = board.parse_move(text).map_err(|error| UciError::InvalidMove {
            move_str: (*text).to_string(),
            error,
        })?;
        board.execute_move(mv);
    }

    Ok(board)
}

/// Output shared between the input loop and the search thread
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// How long a timed search may run before the watchdog stops it
fn watchdog_limit(budget: Duration) -> Duration {
    budget.saturating_mul(2)
}

fn emit(out: &SharedWriter, line: &str) {
    let mut out = out.lock();
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        warn!("failed to write UCI output: {err}");
    }
}

/// One GUI conversation
pub struct UciSession {
    engine: Engine,
    out: SharedWriter,
}

impl UciSession {
    pub fn new<W: Write + Send + 'static>(engine: Engine, writer: W) -> Self {
        let out: SharedWriter = Arc::new(Mutex::new(Box::new(writer)));
        let info_out = Arc::clone(&out);
        engine.set_info_callback(Some(Arc::new(move |info: &SearchIterationInfo| {
            emit(&info_out, &format_info(info));
        })));
        UciSession { engine, out }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn send(&self, line: &str) {
        emit(&self.out, line);
    }

    /// Handle one input line. Returns `false` on `quit`.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match parse_uci_command(line) {
            Some(cmd) => self.handle(cmd),
            None => true,
        }
    }

    /// Returns `false` on `quit`.
    pub fn handle(&mut self, cmd: UciCommand) -> bool {
        match cmd {
            UciCommand::Uci => {
                self.send(&format!("id name {ENGINE_NAME}"));
                self.send(&format!("id author {ENGINE_AUTHOR}"));
                for line in option_lines(&self.engine.settings()) {
                    self.send(&line);
                }
                self.send("uciok");
            }
            UciCommand::IsReady => self.send("readyok"),
            UciCommand::UciNewGame => {
                self.engine.stop_search_and_wait();
                self.engine.clear_transpositions();
                self.engine.set_position(Board::start_pos());
            }
            UciCommand::Position(parts) => match parse_position_command(&parts) {
                Ok(board) => {
                    if !self.engine.set_position(board) {
                        self.send("info string cannot change position while searching");
                    }
                }
                Err(err) => {
                    warn!("{err}");
                    self.send(&format!("info string {err}"));
                }
            },
            UciCommand::Go(params) => self.go(&params),
            UciCommand::SetOption(parts) => self.set_option(&parts),
            UciCommand::Display => {
                let board = self.engine.get_position();
                self.send(&board.to_string());
                self.send(&format!("Fen: {}", board.to_fen()));
                self.send(&format!("Key: {:016x}", board.hash()));
            }
            UciCommand::Stop => self.engine.stop_search(),
            UciCommand::Quit => {
                self.engine.stop_search_and_wait();
                return false;
            }
            UciCommand::Unknown(line) => debug!("ignoring unknown command: {line}"),
        }
        true
    }

    fn set_option(&self, parts: &[String]) {
        let Some((name, value)) = parse_setoption(parts) else {
            self.send("info string malformed setoption");
            return;
        };
        let mut settings = self.engine.settings();
        if apply_setoption(&mut settings, &name, value.as_deref()) {
            debug!("option {name} set to {value:?}");
            self.engine.set_settings(settings);
        } else {
            self.send(&format!("info string unsupported option {name}"));
        }
    }

    fn go(&self, params: &GoParams) {
        if let Some(depth) = params.perft {
            self.perft(depth);
            return;
        }

        let position = self.engine.get_position();
        let budget = params.time_budget(position.turn());
        let depth = params.depth.unwrap_or(if budget.is_some() || params.infinite {
            MAX_SEARCH_DEPTH
        } else {
            DEFAULT_GO_DEPTH
        });

        let (done_tx, done_rx) = mpsc::channel::<()>();
        let out = Arc::clone(&self.out);
        let spawned = self.engine.spawn_search(depth, budget, move |status, pv| {
            // A search stopped before depth 1 finished still owes a legal move
            let best = pv.first().copied().or_else(|| position.generate_moves().get(0));
            debug!("search finished: {status:?}");
            emit(&out, &format_bestmove(best));
            let _ = done_tx.send(());
        });

        match spawned {
            Ok(Some(_)) => {
                if let Some(budget) = budget {
                    self.start_watchdog(budget, done_rx);
                }
            }
            Ok(None) => self.send("info string search already running"),
            Err(err) => {
                error!("could not start search: {err}");
                self.send(&format_bestmove(None));
            }
        }
    }

    /// Iterations are only checked between depths; stop a search that runs
    /// far past its budget.
    fn start_watchdog(&self, budget: Duration, done: mpsc::Receiver<()>) {
        let engine = self.engine.clone();
        let spawned = thread::Builder::new().name("watchdog".to_string()).spawn(move || {
            if let Err(mpsc::RecvTimeoutError::Timeout) = done.recv_timeout(watchdog_limit(budget)) {
                debug!("hard time limit reached");
                engine.stop_search();
            }
        });
        if let Err(err) = spawned {
            warn!("no watchdog for timed search: {err}");
        }
    }

    fn perft(&self, depth: u16) {
        let engine = self.engine.clone();
        let out = Arc::clone(&self.out);
        let spawned = thread::Builder::new().name("perft".to_string()).spawn(move || {
            let report = engine.do_perft_search(depth);
            match report.status {
                SearchStatus::CouldNotStart => emit(&out, "info string search already running"),
                _ => {
                    for line in format_perft(&report) {
                        emit(&out, &line);
                    }
                }
            }
        });
        if let Err(err) = spawned {
            error!("could not start perft: {err}");
        }
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run_uci_loop<R, W>(engine: Engine, input: R, output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let mut session = UciSession::new(engine, output);
    for line in input.lines() {
        if !session.handle_line(&line?) {
            return Ok(());
        }
    }
    session.engine().stop_search_and_wait();
    Ok(())
}
