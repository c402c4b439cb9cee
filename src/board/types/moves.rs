//! Move types and move list.

use std::fmt;
use std::ops::Index;

use super::piece::Piece;
use super::square::Square;

pub(crate) const FLAG_CAPTURE: u8 = 1;
pub(crate) const FLAG_EN_PASSANT: u8 = 1 << 1;
pub(crate) const FLAG_CASTLE: u8 = 1 << 2;
pub(crate) const FLAG_PROMOTION: u8 = 1 << 3;

/// A move as produced by move generation.
///
/// `true_index` is the move's position in the generation order for the
/// position it was generated from. Generation is deterministic, so the index
/// names the same move again after regenerating. `rating` is a sort key that
/// only means something inside a single ordering pass.
#[derive(Clone, Copy)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) original_piece: Piece,
    pub(crate) result_piece: Piece,
    pub(crate) flags: u8,
    pub(crate) true_index: u16,
    pub(crate) rating: i16,
}

impl Move {
    #[inline]
    #[must_use]
    pub(crate) const fn new(from: Square, to: Square, piece: Piece, result: Piece, flags: u8) -> Self {
        Move {
            from,
            to,
            original_piece: piece,
            result_piece: result,
            flags,
            true_index: 0,
            rating: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece that moves
    #[inline]
    #[must_use]
    pub const fn original_piece(self) -> Piece {
        self.original_piece
    }

    /// The piece standing on the destination afterwards (differs only on promotion)
    #[inline]
    #[must_use]
    pub const fn result_piece(self) -> Piece {
        self.result_piece
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.flags & FLAG_CASTLE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        if self.is_promotion() {
            Some(self.result_piece)
        } else {
            None
        }
    }

    /// Index of this move in generation order
    #[inline]
    #[must_use]
    pub const fn true_index(self) -> u16 {
        self.true_index
    }

    #[inline]
    #[must_use]
    pub const fn rating(self) -> i16 {
        self.rating
    }
}

/// Two moves are equal when they describe the same board action; the
/// generation index and rating are bookkeeping.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.original_piece == other.original_piece
            && self.result_piece == other.result_piece
    }
}

impl Eq for Move {}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, " #{})", self.true_index)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on legal moves in any position (218), with headroom for the
/// search re-queuing its hash move.
pub(crate) const MAX_MOVES: usize = 256;

const EMPTY_MOVE: Move = Move::new(Square(0), Square(0), Piece::Pawn, Piece::Pawn, 0);

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    /// Returns true if an equal move is in the list
    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m == mv)
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let quiet = Move::new(Square(12), Square(28), Piece::Pawn, Piece::Pawn, 0);
        assert_eq!(quiet.to_string(), "e2e4");

        let promo = Move::new(
            Square(52),
            Square(60),
            Piece::Pawn,
            Piece::Queen,
            FLAG_PROMOTION,
        );
        assert_eq!(promo.to_string(), "e7e8q");
        assert_eq!(promo.promotion(), Some(Piece::Queen));
    }

    #[test]
    fn test_equality_ignores_bookkeeping() {
        let mut a = Move::new(Square(1), Square(18), Piece::Knight, Piece::Knight, 0);
        let b = a;
        a.rating = 55;
        a.true_index = 3;
        assert_eq!(a, b);
    }

    #[test]
    fn test_move_list_push_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::new(Square(6), Square(21), Piece::Knight, Piece::Knight, 0));
        list.push(Move::new(Square(1), Square(18), Piece::Knight, Piece::Knight, 0));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].to(), Square(18));
        assert!(list.get(2).is_none());
    }
}
