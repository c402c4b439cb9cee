use std::fmt;

use super::types::{Bitboard, Color, Piece, Square};
use crate::zobrist;

/// Half-move count at which the fifty-move rule declares a draw
pub(crate) const HALF_MOVE_DRAW_COUNT: u8 = 100;

/// Everything tracked for one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamData {
    pub(crate) occupy: Bitboard,
    pub(crate) piece_sets: [Bitboard; 6],
    pub(crate) king_pos: Square,
    pub(crate) attack: Bitboard,
    /// Sole blockers between an enemy slider and this color's king.
    /// May hold pieces of either color.
    pub(crate) pinned: Bitboard,
    /// This color's pieces that attack the enemy king
    pub(crate) checkers: Bitboard,
    /// Only meaningful while `checkers` is non-empty
    pub(crate) first_checker: Square,
    pub(crate) can_castle_q: bool,
    pub(crate) can_castle_k: bool,
    pub(crate) total_value: i32,
}

impl TeamData {
    const EMPTY: TeamData = TeamData {
        occupy: Bitboard::EMPTY,
        piece_sets: [Bitboard::EMPTY; 6],
        king_pos: Square(0),
        attack: Bitboard::EMPTY,
        pinned: Bitboard::EMPTY,
        checkers: Bitboard::EMPTY,
        first_checker: Square(0),
        can_castle_q: false,
        can_castle_k: false,
        total_value: 0,
    };

    #[inline]
    #[must_use]
    pub fn occupy(&self) -> Bitboard {
        self.occupy
    }

    #[inline]
    #[must_use]
    pub fn piece_set(&self, piece: Piece) -> Bitboard {
        self.piece_sets[piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn king_pos(&self) -> Square {
        self.king_pos
    }

    /// Squares this color threatens
    #[inline]
    #[must_use]
    pub fn attack(&self) -> Bitboard {
        self.attack
    }

    #[inline]
    #[must_use]
    pub fn pinned(&self) -> Bitboard {
        self.pinned
    }

    #[inline]
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.checkers
    }

    #[inline]
    #[must_use]
    pub fn first_checker(&self) -> Option<Square> {
        if self.checkers.is_empty() {
            None
        } else {
            Some(self.first_checker)
        }
    }

    #[inline]
    #[must_use]
    pub fn can_castle_queenside(&self) -> bool {
        self.can_castle_q
    }

    #[inline]
    #[must_use]
    pub fn can_castle_kingside(&self) -> bool {
        self.can_castle_k
    }

    /// Material, square, mobility and space value of this color's army
    #[inline]
    #[must_use]
    pub fn total_value(&self) -> i32 {
        self.total_value
    }
}

/// A chess position with incrementally maintained attack, pin, check, value
/// and hash state.
///
/// Boards are small and `Copy`; search copies the board at every node and
/// applies the move to the copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) teams: [TeamData; 2],
    pub(crate) turn: Color,
    pub(crate) move_num: u16,
    pub(crate) half_moves: u8,
    pub(crate) en_passant_to: Bitboard,
    /// Pawn that may be taken en passant; only valid while `en_passant_to` is set
    pub(crate) en_passant_pawn: Square,
    pub(crate) piece_types: [Option<Piece>; 64],
    pub(crate) piece_values: [i32; 64],
    pub(crate) hash: u64,
}

impl Board {
    /// An empty board with White to move and no rights. Callers place pieces
    /// and then call `force_update_all`.
    #[must_use]
    pub(crate) fn empty() -> Self {
        Board {
            teams: [TeamData::EMPTY; 2],
            turn: Color::White,
            move_num: 1,
            half_moves: 0,
            en_passant_to: Bitboard::EMPTY,
            en_passant_pawn: Square(0),
            piece_types: [None; 64],
            piece_values: [0; 64],
            hash: 0,
        }
    }

    /// The standard starting position
    #[must_use]
    pub fn start_pos() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            board.place_piece(Square::at(file, 0), Color::White, piece);
            board.place_piece(Square::at(file, 7), Color::Black, piece);
            board.place_piece(Square::at(file, 1), Color::White, Piece::Pawn);
            board.place_piece(Square::at(file, 6), Color::Black, Piece::Pawn);
        }
        for team in &mut board.teams {
            team.can_castle_q = true;
            team.can_castle_k = true;
        }
        board.force_update_all();
        board
    }

    /// Put a piece on an empty square without touching derived state
    pub(crate) fn place_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let team = &mut self.teams[color.index()];
        team.occupy.set(sq, true);
        team.piece_sets[piece.index()].set(sq, true);
        if piece == Piece::King {
            team.king_pos = sq;
        }
        self.piece_types[sq.index()] = Some(piece);
    }

    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    #[must_use]
    pub fn team(&self, color: Color) -> &TeamData {
        &self.teams[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn move_num(&self) -> u16 {
        self.move_num
    }

    /// Half-moves since the last pawn move or capture
    #[inline]
    #[must_use]
    pub fn half_moves(&self) -> u8 {
        self.half_moves
    }

    #[inline]
    #[must_use]
    pub fn en_passant_mask(&self) -> Bitboard {
        self.en_passant_to
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.teams[0].occupy | self.teams[1].occupy
    }

    /// Piece and color on a square, if any
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.piece_types[sq.index()]?;
        let color = if self.teams[0].occupy.contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Some((color, piece))
    }

    /// Cached value of the piece on a square, as of its side's last refresh
    #[inline]
    #[must_use]
    pub fn piece_value_at(&self, sq: Square) -> i32 {
        self.piece_values[sq.index()]
    }

    /// Endgame means neither side has a queen
    #[inline]
    #[must_use]
    pub fn is_endgame(&self) -> bool {
        (self.teams[0].piece_sets[Piece::Queen.index()] | self.teams[1].piece_sets[Piece::Queen.index()])
            .is_empty()
    }

    /// Returns true if the side to move is in check
    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.teams[self.turn.opponent().index()].checkers.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.half_moves >= HALF_MOVE_DRAW_COUNT
    }

    /// Static evaluation from the side to move's point of view, after
    /// refreshing that side's values.
    #[must_use]
    pub fn evaluate(&mut self) -> i32 {
        let us = self.turn;
        self.update_attacks_pins_values(us);
        self.teams[us.index()].total_value - self.teams[us.opponent().index()].total_value
    }

    /// Hash computed from scratch
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for color in Color::BOTH {
            let team = &self.teams[color.index()];
            for piece in Piece::ALL {
                for sq in team.piece_sets[piece.index()].iter() {
                    hash ^= zobrist::piece_key(color, piece, sq);
                }
            }
            hash ^= zobrist::castle_key(color, team.can_castle_q, team.can_castle_k);
        }
        hash ^= zobrist::en_passant_key(self.en_passant_to);
        hash ^= zobrist::turn_key(self.turn);
        hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::start_pos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = match self.piece_at(Square::at(file, rank)) {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move, hash {:016x}", self.turn, self.hash)
    }
}
