//! Applying moves to a board.
//!
//! There is no unmake: callers copy the board and apply the move to the copy.

use super::types::{Bitboard, Color, Move, Piece, Square};
use super::Board;
use crate::zobrist;

/// Rook corners, queen side then king side
const ROOK_CORNERS: [[Square; 2]; 2] = [
    [Square::at(0, 0), Square::at(7, 0)],
    [Square::at(0, 7), Square::at(7, 7)],
];

impl Board {
    /// Apply a legal move produced by move generation and pass the turn.
    ///
    /// Only the mover's attacks, pins and values are recomputed; the side now
    /// to move has everything it needs to generate its replies.
    pub fn execute_move(&mut self, mv: Move) {
        let us = self.turn;
        let them = us.opponent();
        let (from, to) = (mv.from, mv.to);
        let piece = mv.original_piece;

        debug_assert!(
            self.teams[us.index()].occupy.contains(from),
            "{:?} moves from an empty square\n{}",
            mv,
            self
        );
        debug_assert!(
            !self.teams[us.index()].occupy.contains(to),
            "{:?} lands on an own piece\n{}",
            mv,
            self
        );
        debug_assert!(
            !self.teams[them.index()].piece_sets[Piece::King.index()].contains(to),
            "{:?} captures a king\n{}",
            mv,
            self
        );

        // Hash out the state that may change below
        self.hash ^= self.castle_hash();
        self.hash ^= zobrist::en_passant_key(self.en_passant_to);
        self.hash ^= zobrist::turn_key(us);

        let captured = if self.teams[them.index()].occupy.contains(to) {
            self.piece_types[to.index()]
        } else {
            None
        };
        if let Some(victim) = captured {
            self.remove_piece(to, them, victim);
        }

        let mut new_en_passant = Bitboard::EMPTY;
        match piece {
            Piece::Pawn => {
                if to.bit() == self.en_passant_to {
                    let victim_sq = self.en_passant_pawn;
                    self.remove_piece(victim_sq, them, Piece::Pawn);
                } else if from.0.abs_diff(to.0) == 16 {
                    new_en_passant = Square((from.0 + to.0) / 2).bit();
                    self.en_passant_pawn = to;
                }
            }
            Piece::King => {
                let td = &mut self.teams[us.index()];
                td.king_pos = to;
                td.can_castle_q = false;
                td.can_castle_k = false;

                let dx = i16::from(to.file()) - i16::from(from.file());
                if dx != 0 && dx % 2 == 0 {
                    let side = usize::from(dx > 0);
                    let rook_from = ROOK_CORNERS[us.index()][side];
                    let rook_to = Square(((i16::from(from.0)) + dx / 2) as u8);
                    self.remove_piece(rook_from, us, Piece::Rook);
                    self.put_piece(rook_to, us, Piece::Rook);
                }
            }
            _ => {}
        }

        // A rook leaving or being taken on its corner ends that castling right
        let corners = ROOK_CORNERS[us.index()];
        let td = &mut self.teams[us.index()];
        if from == corners[0] {
            td.can_castle_q = false;
        } else if from == corners[1] {
            td.can_castle_k = false;
        }
        let enemy_corners = ROOK_CORNERS[them.index()];
        let etd = &mut self.teams[them.index()];
        if to == enemy_corners[0] {
            etd.can_castle_q = false;
        } else if to == enemy_corners[1] {
            etd.can_castle_k = false;
        }

        self.remove_piece(from, us, piece);
        self.put_piece(to, us, mv.result_piece);

        if piece == Piece::Pawn || captured.is_some() || mv.is_en_passant() {
            self.half_moves = 0;
        } else {
            self.half_moves = self.half_moves.saturating_add(1);
        }
        if us == Color::Black {
            self.move_num = self.move_num.saturating_add(1);
        }

        self.en_passant_to = new_en_passant;
        self.hash ^= self.castle_hash();
        self.hash ^= zobrist::en_passant_key(self.en_passant_to);
        self.hash ^= zobrist::turn_key(them);

        self.update_attacks_pins_values(us);
        self.turn = them;
    }

    /// Pass the turn without moving. Used by null-move pruning.
    pub fn execute_null_move(&mut self) {
        let us = self.turn;
        let them = us.opponent();
        self.update_attacks_pins_values(us);

        self.hash ^= zobrist::en_passant_key(self.en_passant_to);
        self.en_passant_to = Bitboard::EMPTY;

        self.hash ^= zobrist::turn_key(us) ^ zobrist::turn_key(them);
        self.turn = them;
    }

    /// Recompute every derived field from the piece sets: occupancy, square
    /// index, king squares, hash, and both sides' attacks, pins, checks and
    /// values. Needed once after building a position by hand.
    pub fn force_update_all(&mut self) {
        self.piece_types = [None; 64];
        self.piece_values = [0; 64];
        for color in Color::BOTH {
            let team = &mut self.teams[color.index()];
            team.occupy = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let set = team.piece_sets[piece.index()];
                team.occupy |= set;
                for sq in set.iter() {
                    self.piece_types[sq.index()] = Some(piece);
                }
            }
            if let Some(king) = team.piece_sets[Piece::King.index()].lsb() {
                team.king_pos = king;
            }
        }

        self.hash = self.compute_hash();
        for color in Color::BOTH {
            self.update_attacks_pins_values(color);
        }
    }

    fn castle_hash(&self) -> u64 {
        Color::BOTH.iter().fold(0, |hash, &color| {
            let team = &self.teams[color.index()];
            hash ^ zobrist::castle_key(color, team.can_castle_q, team.can_castle_k)
        })
    }

    fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let team = &mut self.teams[color.index()];
        team.occupy.set(sq, false);
        team.piece_sets[piece.index()].set(sq, false);
        team.total_value -= self.piece_values[sq.index()];
        self.piece_types[sq.index()] = None;
        self.piece_values[sq.index()] = 0;
        self.hash ^= zobrist::piece_key(color, piece, sq);
    }

    fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let team = &mut self.teams[color.index()];
        team.occupy.set(sq, true);
        team.piece_sets[piece.index()].set(sq, true);
        self.piece_types[sq.index()] = Some(piece);
        self.hash ^= zobrist::piece_key(color, piece, sq);
    }
}
