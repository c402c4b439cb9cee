//! FEN import/export and coordinate move parsing.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::types::{Color, Move, Piece, Square, PROMOTION_PIECES};
use super::Board;

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a position from FEN.
    ///
    /// The half-move clock and move number are optional and default to 0 and
    /// 1. Castling rights whose king or rook is not on its home square are
    /// dropped rather than rejected.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::TooFewFields { found: fields.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, fields[0])?;

        board.turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        parse_castling(&mut board, fields[2])?;
        parse_en_passant(&mut board, fields[3])?;

        if let Some(&clock) = fields.get(4) {
            board.half_moves = clock.parse().map_err(|_| FenError::InvalidHalfMoveClock {
                found: clock.to_string(),
            })?;
        }
        if let Some(&number) = fields.get(5) {
            board.move_num = match number.parse::<u16>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(FenError::InvalidMoveNumber {
                        found: number.to_string(),
                    })
                }
            };
        }

        board.force_update_all();
        if !board.teams[board.turn.index()].checkers.is_empty() {
            return Err(FenError::OpponentInCheck);
        }
        Ok(board)
    }

    /// Write the position as FEN
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = [
            (self.teams[0].can_castle_k, 'K'),
            (self.teams[0].can_castle_q, 'Q'),
            (self.teams[1].can_castle_k, 'k'),
            (self.teams[1].can_castle_q, 'q'),
        ];
        let mut any = false;
        for (allowed, c) in rights {
            if allowed {
                fen.push(c);
                any = true;
            }
        }
        if !any {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_to.lsb() {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.half_moves, self.move_num));
        fen
    }

    /// Find the legal move written in coordinate notation (`e2e4`, `e7e8q`)
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: text.chars().count() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from = Square::from_str(&text[0..2]).map_err(|_| invalid_square())?;
        let to = Square::from_str(&text[2..4]).map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece) if PROMOTION_PIECES.contains(&piece) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount { found: ranks.len() });
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiece { char: c });
                }
                file += skip as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::BadFileCount {
                        rank: usize::from(rank) + 1,
                        files: file + 1,
                    });
                }
                board.place_piece(Square::at(file as u8, rank), color, piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadFileCount {
                rank: usize::from(rank) + 1,
                files: file,
            });
        }
    }

    for color in Color::BOTH {
        let white = color == Color::White;
        match board.teams[color.index()].piece_set(Piece::King).popcount() {
            0 => return Err(FenError::MissingKing { white }),
            1 => {}
            _ => return Err(FenError::MultipleKings { white }),
        }
    }
    Ok(())
}

fn parse_castling(board: &mut Board, castling: &str) -> Result<(), FenError> {
    if castling == "-" {
        return Ok(());
    }
    let mut seen = Vec::with_capacity(4);
    for c in castling.chars() {
        if seen.contains(&c) {
            return Err(FenError::RepeatedCastling { char: c });
        }
        seen.push(c);

        let (color, king_side) = match c {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        };

        let rank = color.back_rank();
        let team = &mut board.teams[color.index()];
        let rook_home = Square::at(if king_side { 7 } else { 0 }, rank);
        let in_place = team.piece_set(Piece::King).contains(Square::at(4, rank))
            && team.piece_set(Piece::Rook).contains(rook_home);
        if king_side {
            team.can_castle_k = in_place;
        } else {
            team.can_castle_q = in_place;
        }
    }
    Ok(())
}

fn parse_en_passant(board: &mut Board, field: &str) -> Result<(), FenError> {
    if field == "-" {
        return Ok(());
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let target = Square::from_str(field).map_err(|_| invalid())?;

    // The pawn that just double-stepped belongs to the side not on move
    let pusher = board.turn.opponent();
    let (target_rank, pawn_sq) = match pusher {
        Color::White => (2, target.offset(0, 1)),
        Color::Black => (5, target.offset(0, -1)),
    };
    let pawn_sq = pawn_sq.ok_or_else(invalid)?;
    if target.rank() != target_rank
        || !board.teams[pusher.index()].piece_set(Piece::Pawn).contains(pawn_sq)
        || board.occupied().contains(target)
    {
        return Err(invalid());
    }

    board.en_passant_to = target.bit();
    board.en_passant_pawn = pawn_sq;
    Ok(())
}
