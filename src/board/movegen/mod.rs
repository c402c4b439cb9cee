//! Legal move generation.
//!
//! Moves are filtered for legality while they are generated: the side to
//! move's check state and pins (kept current by `execute_move`) restrict the
//! destination sets, so no generated move ever needs a make-and-test pass.
//!
//! Output goes to a [`MoveSink`]: a [`MoveList`], a per-move callback, or a
//! plain counter that skips move construction where it can.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables;
use super::types::{Bitboard, Color, Move, MoveList, Piece, Square, FLAG_CAPTURE};
use super::Board;

/// Receives generated moves.
pub trait MoveSink {
    /// When false, generators may report counts through `add_count` instead
    /// of building each move.
    const NEEDS_MOVES: bool = true;

    fn push(&mut self, mv: Move);

    fn add_count(&mut self, _count: u64) {}
}

impl MoveSink for MoveList {
    #[inline]
    fn push(&mut self, mv: Move) {
        MoveList::push(self, mv);
    }
}

/// Calls a closure for every generated move
pub(crate) struct CallbackSink<F>(pub(crate) F);

impl<F: FnMut(Move)> MoveSink for CallbackSink<F> {
    #[inline]
    fn push(&mut self, mv: Move) {
        (self.0)(mv);
    }
}

/// Counts moves without keeping them
#[derive(Default)]
pub(crate) struct CountSink(pub(crate) u64);

impl MoveSink for CountSink {
    const NEEDS_MOVES: bool = false;

    #[inline]
    fn push(&mut self, _mv: Move) {
        self.0 += 1;
    }

    #[inline]
    fn add_count(&mut self, count: u64) {
        self.0 += count;
    }
}

impl Board {
    /// All legal moves for the side to move, in generation order
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_into(&mut moves);
        moves
    }

    /// Clear `moves` and fill it with the legal moves
    pub fn generate_moves_into(&self, moves: &mut MoveList) {
        moves.clear();
        self.generate_with(moves);
    }

    /// Call `f` for every legal move, in generation order
    pub fn for_each_move<F: FnMut(Move)>(&self, f: F) {
        self.generate_with(&mut CallbackSink(f));
    }

    /// Number of legal moves; promotions count once per piece choice
    #[must_use]
    pub fn count_moves(&self) -> u64 {
        let mut counter = CountSink::default();
        self.generate_with(&mut counter);
        counter.0
    }

    pub fn generate_with<S: MoveSink>(&self, sink: &mut S) {
        match self.turn {
            Color::White => Generator::<S, true>::new(self, sink).run(),
            Color::Black => Generator::<S, false>::new(self, sink).run(),
        }
    }
}

/// One generation pass. `WHITE` fixes the side to move at compile time.
pub(super) struct Generator<'a, S: MoveSink, const WHITE: bool> {
    board: &'a Board,
    sink: &'a mut S,
    next_index: u16,
    own: Bitboard,
    enemy: Bitboard,
    all: Bitboard,
    king: Square,
    /// Own pieces that may only move along the line to their king
    pinned: Bitboard,
    /// Squares that resolve a single check (everything when not in check)
    block_mask: Bitboard,
    checkers: Bitboard,
}

impl<'a, S: MoveSink, const WHITE: bool> Generator<'a, S, WHITE> {
    const US: Color = if WHITE { Color::White } else { Color::Black };
    const THEM: Color = if WHITE { Color::Black } else { Color::White };

    fn new(board: &'a Board, sink: &'a mut S) -> Self {
        let td = board.team(Self::US);
        let etd = board.team(Self::THEM);
        let checkers = etd.checkers;
        let king = td.king_pos;

        let block_mask = if checkers.is_single() {
            attack_tables::between(etd.first_checker, king) | checkers
        } else {
            Bitboard::ALL
        };

        Generator {
            board,
            sink,
            next_index: 0,
            own: td.occupy,
            enemy: etd.occupy,
            all: td.occupy | etd.occupy,
            king,
            pinned: td.pinned & td.occupy,
            block_mask,
            checkers,
        }
    }

    fn run(mut self) {
        // Nothing but the king can answer a double check
        if self.checkers.popcount() < 2 {
            self.pawn_moves();
            self.knight_moves();
            self.slider_moves(Piece::Bishop);
            self.slider_moves(Piece::Rook);
            self.slider_moves(Piece::Queen);
        }
        self.king_moves();
        if self.checkers.is_empty() {
            self.castling_moves();
        }
    }

    #[inline]
    fn pieces(&self, piece: Piece) -> Bitboard {
        self.board.team(Self::US).piece_set(piece)
    }

    /// Restrict a pinned piece to its pin line
    #[inline]
    fn pin_filter(&self, from: Square, targets: Bitboard) -> Bitboard {
        if self.pinned.contains(from) {
            targets & attack_tables::line(from, self.king)
        } else {
            targets
        }
    }

    #[inline]
    fn emit(&mut self, from: Square, to: Square, piece: Piece, result: Piece, flags: u8) {
        let mut mv = Move::new(from, to, piece, result, flags);
        mv.true_index = self.next_index;
        self.next_index += 1;
        self.sink.push(mv);
    }

    /// Emit one move per target square, flagging captures
    #[inline]
    fn emit_targets(&mut self, from: Square, piece: Piece, targets: Bitboard) {
        if !S::NEEDS_MOVES {
            self.sink.add_count(u64::from(targets.popcount()));
            return;
        }
        for to in targets.iter() {
            let flags = if self.enemy.contains(to) { FLAG_CAPTURE } else { 0 };
            self.emit(from, to, piece, piece, flags);
        }
    }
}
