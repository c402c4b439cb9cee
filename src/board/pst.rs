//! Piece values, piece-square tables, and the positional bonuses folded into
//! each side's running total.
//!
//! Square tables cover one half of the board (files a-d) from White's point of
//! view, top rank first; files e-h are mirrored onto them.

use super::types::{Bitboard, Color, Piece, Square};

/// Base material value in centipawns, indexed by `Piece::index()`
pub(crate) const BASE_VALUES: [i32; 6] = [100, 310, 330, 550, 950, 0];

/// Value added per available move, indexed by `Piece::index()`.
/// Pawn pushes and captures differ, so pawns get no mobility credit.
pub(crate) const MOBILITY_BONUS: [i32; 6] = [0, 5, 4, 3, 2, 1];

const MIDDLEGAME: usize = 0;
const ENDGAME: usize = 1;

#[rustfmt::skip]
const SQUARE_BONUS: [[[i32; 32]; 2]; 6] = [
    // Pawn
    [
        [
             0,   0,   0,   0,
            50,  50,  50,  50,
            10,  10,  20,  30,
             5,   5,  10,  25,
             0,   0,   5,  25,
             5,  -5,   5,  10,
             5,   0,   0, -35,
             0,   0,   0,   0,
        ],
        [
             0,   0,   0,   0,
           150, 150, 150, 150,
            80,  80,  80,  80,
            40,  40,  40,  40,
            15,  15,  15,  15,
             5,   5,   5,   5,
             3,   3,   3,   3,
             0,   0,   0,   0,
        ],
    ],
    // Knight
    [
        [
           -50, -40, -30, -30,
           -40, -20,   0,   0,
           -30,   0,  10,  15,
           -30,   5,  15,  20,
           -30,   0,  15,  20,
           -30,   5,  15,  15,
           -40, -20,   0,   0,
           -50, -40, -30, -30,
        ],
        [
           -50, -40, -30, -30,
           -40, -20,   0,   0,
           -30,   0,  10,  15,
           -30,   5,  15,  20,
           -30,   0,  15,  20,
           -30,   5,  10,  15,
           -40, -20,   0,   5,
           -50, -40, -30, -30,
        ],
    ],
    // Bishop
    [
        [
           -20, -10, -10, -10,
           -10,   0,   0,   0,
           -10,   0,   5,  10,
           -10,   5,   5,  10,
           -10,   0,  10,  10,
           -10,  10,  10,  10,
           -10,   5,   0,   0,
           -20, -10, -10, -10,
        ],
        [
           -20, -10, -10, -10,
           -10,   0,   0,   0,
           -10,   0,   5,  10,
           -10,   5,   5,  10,
           -10,   0,  10,  10,
           -10,  10,  10,  10,
           -10,   5,   0,   0,
           -20, -10, -10, -10,
        ],
    ],
    // Rook
    [
        [
             0,   0,   0,   0,
             5,  10,  10,  10,
            -5,   0,   0,   0,
            -5,   0,   0,   0,
            -5,   0,   0,   0,
            -5,   0,   0,   0,
            -5,   0,   0,   0,
             0,   0,   0,   5,
        ],
        [
             3,   5,   5,   5,
             7,  15,  15,  15,
             5,  10,  10,  10,
             3,   5,   5,   5,
             0,   0,   0,   0,
             0,   0,   0,   0,
             0,   0,   0,   0,
             5,   5,   5,   5,
        ],
    ],
    // Queen
    [
        [
           -20, -10, -10,  -5,
           -10,   0,   0,   0,
           -10,   0,   5,   5,
            -5,   0,   5,   5,
             0,   0,   5,   5,
           -10,   5,   5,   5,
           -10,   0,   5,   5,
           -20, -10, -10,   0,
        ],
        [
             0,   0,   0,   0,
             0,   0,   5,   5,
             0,   5,  10,  12,
             0,   5,  10,  12,
             0,   5,  10,  12,
             0,   5,   5,   5,
             0,   0,   5,   5,
             0,   0, -10, -10,
        ],
    ],
    // King
    [
        [
           -30, -40, -40, -50,
           -30, -40, -40, -50,
           -30, -40, -40, -50,
           -30, -40, -40, -50,
           -20, -30, -30, -40,
           -10, -20, -20, -20,
            20,  20,   0,   0,
            10,  15,  10,   0,
        ],
        [
             0,   0,   0,   0,
             0,   0,   5,   5,
             0,   5,   7,   7,
             0,   5,   7,   7,
             0,   5,   7,   7,
             0,   5,   5,   5,
             0,   0,   5,   5,
             0,   0,   0,   0,
        ],
    ],
];

/// Material plus square bonus for a piece of `color` standing on `sq`.
#[must_use]
pub(crate) fn piece_square_value(piece: Piece, sq: Square, color: Color, endgame: bool) -> i32 {
    let rank = match color {
        Color::White => sq.rank(),
        Color::Black => 7 - sq.rank(),
    };
    let file = sq.file();
    let mirror_file = if file < 4 { file } else { 7 - file };
    let idx = mirror_file as usize + (7 - rank as usize) * 4;
    let phase = if endgame { ENDGAME } else { MIDDLEGAME };

    BASE_VALUES[piece.index()] + SQUARE_BONUS[piece.index()][phase][idx]
}

const CENTER: Bitboard = Bitboard(0x0000_003C_3C00_0000);

/// Bonus for controlling the opponent's half of the board and the 4x2 center
/// block, measured on the side's attack set.
#[must_use]
pub(crate) fn space_bonus(attack: Bitboard, color: Color, endgame: bool) -> i32 {
    const SPACE_WEIGHT: [i32; 2] = [8, 2];
    const CENTER_WEIGHT: [i32; 2] = [16, 4];

    let enemy_half = match color {
        Color::White => Bitboard::BLACK_HALF,
        Color::Black => Bitboard::WHITE_HALF,
    };
    let phase = if endgame { ENDGAME } else { MIDDLEGAME };

    (attack & enemy_half).popcount() as i32 * SPACE_WEIGHT[phase]
        + (attack & CENTER).popcount() as i32 * CENTER_WEIGHT[phase]
}
