// src/notation.rs
// O(1) glyph <-> (piece, color) maps and human-readable labels.
// Pure functions: unknown input maps to `None` or '\0', never a panic.

use crate::board::{Color, Piece};

/// Placeholder for an empty FEN/EPD field.
pub const STR_DASH: &str = "-";
/// Castling king-side, AKA "castling short".
pub const STR_CASTLE_SHORT: &str = "O-O";
/// Castling queen-side, AKA "castling long".
pub const STR_CASTLE_LONG: &str = "O-O-O";

const CHAR_TO_PC: [Option<(Color, Piece)>; 128] = {
    let mut table: [Option<(Color, Piece)>; 128] = [None; 128];

    // Uppercase = White
    table['P' as usize] = Some((Color::White, Piece::Pawn));
    table['N' as usize] = Some((Color::White, Piece::Knight));
    table['B' as usize] = Some((Color::White, Piece::Bishop));
    table['R' as usize] = Some((Color::White, Piece::Rook));
    table['Q' as usize] = Some((Color::White, Piece::Queen));
    table['K' as usize] = Some((Color::White, Piece::King));

    // Lowercase = Black
    table['p' as usize] = Some((Color::Black, Piece::Pawn));
    table['n' as usize] = Some((Color::Black, Piece::Knight));
    table['b' as usize] = Some((Color::Black, Piece::Bishop));
    table['r' as usize] = Some((Color::Black, Piece::Rook));
    table['q' as usize] = Some((Color::Black, Piece::Queen));
    table['k' as usize] = Some((Color::Black, Piece::King));

    table
};

/// Indexed by the square-table code `(color << 3) | piece`; gaps hold '\0'.
const CODE_TO_CHAR: [char; 16] = [
    'P', 'N', 'B', 'R', 'Q', 'K', '\0', '\0', //
    'p', 'n', 'b', 'r', 'q', 'k', '\0', '\0',
];

const PIECE_NAMES: [&str; 6] = ["Pawn", "Knight", "Bishop", "Rook", "Queen", "King"];

const LABELS: [[&str; 6]; 2] = [
    [
        "White Pawn",
        "White Knight",
        "White Bishop",
        "White Rook",
        "White Queen",
        "White King",
    ],
    [
        "Black Pawn",
        "Black Knight",
        "Black Bishop",
        "Black Rook",
        "Black Queen",
        "Black King",
    ],
];

#[inline]
pub fn piece_from_glyph(ch: char) -> Option<(Color, Piece)> {
    CHAR_TO_PC.get(ch as usize).copied().flatten()
}

#[inline]
pub fn piece_to_glyph(color: Color, piece: Piece) -> char {
    CODE_TO_CHAR[((color as usize) << 3) | piece as usize]
}

/// Glyph for a raw square-table code, '\0' if the code names no piece.
#[inline]
pub fn piece_code_to_glyph(code: u8) -> char {
    CODE_TO_CHAR.get(code as usize).copied().unwrap_or('\0')
}

/// Piece type for a glyph of either case.
#[inline]
pub fn piece_type_from_glyph(ch: char) -> Option<Piece> {
    piece_from_glyph(ch).map(|(_, piece)| piece)
}

/// Uppercase glyph for a piece type.
#[inline]
pub fn piece_type_to_glyph(piece: Piece) -> char {
    piece_to_glyph(Color::White, piece)
}

#[inline]
pub fn player_from_glyph(ch: char) -> Option<Color> {
    match ch {
        'w' => Some(Color::White),
        'b' => Some(Color::Black),
        _ => None,
    }
}

#[inline]
pub fn player_to_glyph(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

/// "White Queen", "Black Bishop", …
#[inline]
pub fn piece_label(color: Color, piece: Piece) -> &'static str {
    LABELS[color as usize][piece as usize]
}

#[inline]
pub fn piece_type_label(piece: Piece) -> &'static str {
    PIECE_NAMES[piece as usize]
}

#[inline]
pub fn player_label(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(player_label(*self))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(piece_type_label(*self))
    }
}
