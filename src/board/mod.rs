//! Chess board representation and game logic.
//!
//! Bitboards with incrementally maintained attacks, pins, checks, values and
//! hash, legal move generation, and the alpha-beta search built on them.
//!
//! # Example
//! ```
//! use bitmouse::board::Board;
//!
//! let board = Board::start_pos();
//! let moves = board.generate_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

pub(crate) mod attack_tables;
mod attack_update;
mod error;
mod fen;
mod make_move;
mod movegen;
pub(crate) mod pst;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::init;
pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use movegen::MoveSink;
pub use state::{Board, TeamData};
pub use types::{Bitboard, BitboardIter, Color, Move, MoveList, Piece, Square};
