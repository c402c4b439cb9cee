//! bitmouse: a bitboard chess engine with a negamax search, a shared
//! transposition table and a UCI front end.
//!
//! ```
//! use bitmouse::engine::{Engine, EngineSettings, SearchStatus};
//!
//! let engine = Engine::try_new(EngineSettings::default().with_tt_megabytes(1)).unwrap();
//! assert_eq!(engine.do_search(2, None), SearchStatus::Completed);
//! assert!(!engine.get_current_pv().is_empty());
//! ```

pub mod board;
pub mod engine;
pub mod sync;
pub mod tt;
pub mod uci;
mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{Engine, EngineSettings, EngineState, SearchStatus};
pub use tt::TranspositionTable;
