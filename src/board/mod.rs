mod fen;

use crate::bitboard::BitboardExt;
use crate::hash::zobrist::{extra_hash, piece_key};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod castle_bits;
pub use castle_bits::*;
pub use fen::{FEN_INITIAL, FenError, is_valid_fen};

// Starting position constants
// White side (ranks 1 & 2)
const WHITE_PAWN_MASK: u64 = 0x0000_0000_0000_FF00;
const WHITE_ROOK_MASK: u64 = (1 << 0) | (1 << 7);
const WHITE_KNIGHT_MASK: u64 = (1 << 1) | (1 << 6);
const WHITE_BISHOP_MASK: u64 = (1 << 2) | (1 << 5);
const WHITE_QUEEN_MASK: u64 = 1 << 3;
const WHITE_KING_MASK: u64 = 1 << 4;

// Black side (ranks 7 & 8)
const BLACK_PAWN_MASK: u64 = 0x00FF_0000_0000_0000;
const BLACK_ROOK_MASK: u64 = (1 << 56) | (1 << 63);
const BLACK_KNIGHT_MASK: u64 = (1 << 57) | (1 << 62);
const BLACK_BISHOP_MASK: u64 = (1 << 58) | (1 << 61);
const BLACK_QUEEN_MASK: u64 = 1 << 59;
const BLACK_KING_MASK: u64 = 1 << 60;

const START_LAYOUT: [(Color, Piece, u64); 12] = [
    (Color::White, Piece::Pawn, WHITE_PAWN_MASK),
    (Color::White, Piece::Knight, WHITE_KNIGHT_MASK),
    (Color::White, Piece::Bishop, WHITE_BISHOP_MASK),
    (Color::White, Piece::Rook, WHITE_ROOK_MASK),
    (Color::White, Piece::Queen, WHITE_QUEEN_MASK),
    (Color::White, Piece::King, WHITE_KING_MASK),
    (Color::Black, Piece::Pawn, BLACK_PAWN_MASK),
    (Color::Black, Piece::Knight, BLACK_KNIGHT_MASK),
    (Color::Black, Piece::Bishop, BLACK_BISHOP_MASK),
    (Color::Black, Piece::Rook, BLACK_ROOK_MASK),
    (Color::Black, Piece::Queen, BLACK_QUEEN_MASK),
    (Color::Black, Piece::King, BLACK_KING_MASK),
];

// Empty square value, no piece code (color<<3 | piece) will coincide with 255
pub(crate) const EMPTY_SQ: u8 = 0xFF;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece type, color-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("{color:?} {piece:?} bitboard overlaps another piece")]
    Overlap { color: Color, piece: Piece },
    #[error("square {square} disagrees between bitboards and piece table")]
    MailboxMismatch { square: Square },
    #[error("{0:?} occupancy does not match its piece bitboards")]
    OccupancyMismatch(Color),
}

/// One chess position: placement, side to move, castling rights, en passant
/// square and clocks, with an incrementally maintained Zobrist fingerprint.
///
/// Placement is kept twice (bitboards and a square table). Every edit goes
/// through `put_piece` / `take_piece` / `shift_piece`, which update both
/// copies and the matching hash component together.
#[derive(Debug, Clone)]
pub struct Position {
    /// [color][piece] bitboards
    pub(crate) piece_bb: [[u64; 6]; 2],
    /// Per-color occupancy
    pub(crate) occ: [u64; 2],
    pub(crate) occ_all: u64,
    /// 0xFF = empty, otherwise (color<<3)|piece
    pub(crate) piece_on_sq: [u8; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastleBits,
    pub(crate) en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub(crate) halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub(crate) fullmove_number: u32,
    /// Zobrist of non-pawn placement.
    pub(crate) hash_pieces: u64,
    /// Zobrist of pawn placement.
    pub(crate) hash_pawns: u64,
    /// Zobrist of (castling, en passant, side to move).
    pub(crate) hash_extra: u64,
    /// Pieces checking the side to move; `None` until computed.
    pub(crate) checkers: Cell<Option<u64>>,
}

#[inline(always)]
const fn encode_piece(color: Color, piece: Piece) -> u8 {
    (color as u8) << 3 | (piece as u8)
}

#[inline(always)]
fn decode_piece(code: u8) -> Option<(Color, Piece)> {
    if code == EMPTY_SQ {
        None
    } else {
        Some((Color::from_u8((code >> 3) & 1), Piece::from_u8(code & 0b111)))
    }
}

impl Position {
    /// Create an empty board (no pieces, no rights, White to move).
    pub fn new_empty() -> Self {
        let mut pos = Position {
            piece_bb: [[0u64; 6]; 2],
            occ: [0u64; 2],
            occ_all: 0,
            piece_on_sq: [EMPTY_SQ; 64],
            side_to_move: Color::White,
            castling_rights: CASTLE_NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash_pieces: 0,
            hash_pawns: 0,
            hash_extra: 0,
            checkers: Cell::new(None),
        };
        pos.refresh_extra_hash();
        pos
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut pos = Position::new_empty();
        for &(color, piece, mask) in &START_LAYOUT {
            for sq in mask.squares() {
                pos.put_piece(sq, color, piece);
            }
        }
        pos.set_castling_rights(CASTLE_ALL);
        pos
    }

    // ------------------------------------------------------------------
    // Primitive edits. The only code that touches placement directly.
    // ------------------------------------------------------------------

    #[inline(always)]
    fn toggle_hash(&mut self, color: Color, piece: Piece, sq: Square) {
        let key = piece_key(color, piece, sq);
        if piece == Piece::Pawn {
            self.hash_pawns ^= key;
        } else {
            self.hash_pieces ^= key;
        }
    }

    /// Puts a piece on an empty square.
    #[inline]
    pub(crate) fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let i = sq.index() as usize;
        debug_assert_eq!(self.piece_on_sq[i], EMPTY_SQ, "put_piece on occupied {sq}");
        let mask = sq.bit();
        self.piece_bb[color as usize][piece as usize] |= mask;
        self.occ[color as usize] |= mask;
        self.occ_all |= mask;
        self.piece_on_sq[i] = encode_piece(color, piece);
        self.toggle_hash(color, piece, sq);
    }

    /// Clears a square, returning what stood there.
    #[inline]
    pub(crate) fn take_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let i = sq.index() as usize;
        let (color, piece) = decode_piece(self.piece_on_sq[i])?;
        let keep = !sq.bit();
        self.piece_bb[color as usize][piece as usize] &= keep;
        self.occ[color as usize] &= keep;
        self.occ_all &= keep;
        self.piece_on_sq[i] = EMPTY_SQ;
        self.toggle_hash(color, piece, sq);
        Some((color, piece))
    }

    /// Relocates the piece on `from` to the empty square `to`.
    #[inline]
    pub(crate) fn shift_piece(&mut self, from: Square, to: Square) {
        let fi = from.index() as usize;
        let ti = to.index() as usize;
        debug_assert_eq!(self.piece_on_sq[ti], EMPTY_SQ, "shift_piece onto occupied {to}");
        let Some((color, piece)) = decode_piece(self.piece_on_sq[fi]) else {
            panic!("shift_piece from empty square {from}");
        };
        let mask = from.bit() | to.bit();
        self.piece_bb[color as usize][piece as usize] ^= mask;
        self.occ[color as usize] ^= mask;
        self.occ_all ^= mask;
        self.piece_on_sq[ti] = self.piece_on_sq[fi];
        self.piece_on_sq[fi] = EMPTY_SQ;
        self.toggle_hash(color, piece, from);
        self.toggle_hash(color, piece, to);
    }

    #[inline(always)]
    pub(crate) fn invalidate_checkers(&self) {
        self.checkers.set(None);
    }

    #[inline(always)]
    pub(crate) fn refresh_extra_hash(&mut self) {
        self.hash_extra = extra_hash(self.castling_rights, self.en_passant, self.side_to_move);
    }

    // ------------------------------------------------------------------
    // Placement edits for setup code (codecs, tests, editors).
    // ------------------------------------------------------------------

    /// Sets or clears a square. Castling rights and the en passant square are
    /// left alone; re-derive them with `set_castling_rights` / `set_en_passant`.
    pub fn set(&mut self, sq: Square, content: Option<(Color, Piece)>) {
        if self.piece_at(sq) == content {
            return;
        }
        self.take_piece(sq);
        if let Some((color, piece)) = content {
            self.put_piece(sq, color, piece);
        }
        self.invalidate_checkers();
    }

    /// Places a piece, replacing any occupant.
    #[inline]
    pub fn place(&mut self, sq: Square, color: Color, piece: Piece) {
        self.set(sq, Some((color, piece)));
    }

    /// Empties a square, returning the previous occupant.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let old = self.piece_at(sq);
        self.set(sq, None);
        old
    }

    /// Requests castling rights. Rights whose king or rook is not on its home
    /// square are dropped silently.
    pub fn set_castling_rights(&mut self, requested: CastleBits) {
        let mut rights = requested & CASTLE_ALL;

        let is = |pos: &Self, sq: Square, color: Color, piece: Piece| {
            pos.piece_at(sq) == Some((color, piece))
        };

        if !is(self, Square::E1, Color::White, Piece::King) {
            rights &= !CASTLE_WHITE;
        } else {
            if !is(self, Square::A1, Color::White, Piece::Rook) {
                rights &= !CASTLE_WQ;
            }
            if !is(self, Square::H1, Color::White, Piece::Rook) {
                rights &= !CASTLE_WK;
            }
        }

        if !is(self, Square::E8, Color::Black, Piece::King) {
            rights &= !CASTLE_BLACK;
        } else {
            if !is(self, Square::A8, Color::Black, Piece::Rook) {
                rights &= !CASTLE_BQ;
            }
            if !is(self, Square::H8, Color::Black, Piece::Rook) {
                rights &= !CASTLE_BK;
            }
        }

        if rights != self.castling_rights {
            self.castling_rights = rights;
            self.refresh_extra_hash();
        }
    }

    /// Sets the en passant target. The square is kept only if it is empty,
    /// sits on the capture rank for the side to move, and an enemy pawn stands
    /// just beyond it; otherwise the target becomes `None`.
    pub fn set_en_passant(&mut self, target: Option<Square>) {
        let target = target.filter(|&sq| {
            if !self.is_empty(sq) {
                return false;
            }
            match self.side_to_move {
                Color::White => {
                    sq.rank() == 5
                        && sq
                            .offset(-8)
                            .is_some_and(|p| self.piece_at(p) == Some((Color::Black, Piece::Pawn)))
                }
                Color::Black => {
                    sq.rank() == 2
                        && sq
                            .offset(8)
                            .is_some_and(|p| self.piece_at(p) == Some((Color::White, Piece::Pawn)))
                }
            }
        });

        if target != self.en_passant {
            self.en_passant = target;
            self.refresh_extra_hash();
        }
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        if color != self.side_to_move {
            self.side_to_move = color;
            self.invalidate_checkers();
            self.refresh_extra_hash();
        }
    }

    #[inline]
    pub fn set_halfmove_clock(&mut self, plies: u32) {
        self.halfmove_clock = plies;
    }

    /// Clamped to at least 1.
    #[inline]
    pub fn set_fullmove_number(&mut self, number: u32) {
        self.fullmove_number = number.max(1);
    }

    /// Overwrites this position with `src`. The placement arrays are copied
    /// only when the placement hashes differ.
    pub fn copy_from(&mut self, src: &Position) {
        self.side_to_move = src.side_to_move;
        self.castling_rights = src.castling_rights;
        self.en_passant = src.en_passant;
        self.halfmove_clock = src.halfmove_clock;
        self.fullmove_number = src.fullmove_number;
        self.hash_extra = src.hash_extra;
        self.checkers.set(src.checkers.get());

        if self.hash_pawns != src.hash_pawns || self.hash_pieces != src.hash_pieces {
            self.hash_pawns = src.hash_pawns;
            self.hash_pieces = src.hash_pieces;
            self.piece_bb = src.piece_bb;
            self.occ = src.occ;
            self.occ_all = src.occ_all;
            self.piece_on_sq = src.piece_on_sq;
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[inline(always)]
    pub(crate) fn bb(&self, color: Color, piece: Piece) -> u64 {
        self.piece_bb[color as usize][piece as usize]
    }

    #[inline(always)]
    /// Bitboard of all pieces (both colors).
    pub fn occupied(&self) -> u64 {
        self.occ_all
    }

    #[inline(always)]
    /// Bitboard of all pieces for one side.
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occ[color as usize]
    }

    #[inline(always)]
    pub fn pieces(&self, piece: Piece, color: Color) -> u64 {
        self.bb(color, piece)
    }

    /// Returns the piece and color at a given square, or None if empty.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        decode_piece(self.piece_on_sq[sq.index() as usize])
    }

    /// Raw-index variant of `piece_at`; indices past 63 read as empty.
    pub fn piece_at_index(&self, idx: usize) -> Option<(Color, Piece)> {
        self.piece_on_sq.get(idx).copied().and_then(decode_piece)
    }

    #[inline(always)]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    #[inline(always)]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_on_sq[sq.index() as usize] == EMPTY_SQ
    }

    /// Raw-index variant of `is_empty`; indices past 63 are not empty squares.
    pub fn is_empty_index(&self, idx: usize) -> bool {
        self.piece_on_sq.get(idx) == Some(&EMPTY_SQ)
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn opposing_side(&self) -> Color {
        !self.side_to_move
    }

    #[inline(always)]
    pub fn castling_rights(&self) -> CastleBits {
        self.castling_rights
    }

    #[inline(always)]
    pub fn has_castling(&self, flag: CastleBits) -> bool {
        self.castling_rights & flag != 0
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline(always)]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist fingerprint of the whole position.
    #[inline(always)]
    pub fn fingerprint(&self) -> u64 {
        self.hash_pieces ^ self.hash_pawns ^ self.hash_extra
    }

    #[inline(always)]
    pub fn pawn_hash(&self) -> u64 {
        self.hash_pawns
    }

    #[inline(always)]
    pub fn piece_hash(&self) -> u64 {
        self.hash_pieces
    }

    #[inline(always)]
    pub fn extra_hash(&self) -> u64 {
        self.hash_extra
    }

    /// King square for `color`. Positions are expected to hold exactly one
    /// king per side; with several, the lowest square wins.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bb(color, Piece::King);
        (kings != 0).then(|| Square::from_index(kings.lsb()))
    }

    /// Zero-based ply for a move number and mover, `None` before move 1.
    pub fn compute_ply(move_number: u32, side: Color) -> Option<u32> {
        (move_number >= 1).then(|| ((move_number - 1) << 1) + side as u32)
    }

    /// Full recompute from current state. Must match the incremental hash at all times.
    pub fn compute_fingerprint_full(&self) -> u64 {
        let (pieces, pawns) = self.compute_placement_hashes();
        pieces ^ pawns ^ extra_hash(self.castling_rights, self.en_passant, self.side_to_move)
    }

    /// (non-pawn, pawn) placement hashes recomputed from the bitboards.
    pub fn compute_placement_hashes(&self) -> (u64, u64) {
        let mut pieces = 0u64;
        let mut pawns = 0u64;
        for color in Color::ALL {
            for piece in Piece::ALL {
                for sq in self.bb(color, piece).squares() {
                    if piece == Piece::Pawn {
                        pawns ^= piece_key(color, piece, sq);
                    } else {
                        pieces ^= piece_key(color, piece, sq);
                    }
                }
            }
        }
        (pieces, pawns)
    }

    /// Checks that bitboards do not overlap and agree with the square table.
    pub fn validate(&self) -> Result<(), PositionError> {
        let mut seen: u64 = 0;
        let mut by_color = [0u64; 2];
        for color in Color::ALL {
            for piece in Piece::ALL {
                let bb = self.bb(color, piece);
                if seen & bb != 0 {
                    return Err(PositionError::Overlap { color, piece });
                }
                seen |= bb;
                by_color[color as usize] |= bb;
                for sq in bb.squares() {
                    if self.piece_at(sq) != Some((color, piece)) {
                        return Err(PositionError::MailboxMismatch { square: sq });
                    }
                }
            }
        }
        for color in Color::ALL {
            if by_color[color as usize] != self.occ[color as usize] {
                return Err(PositionError::OccupancyMismatch(color));
            }
        }
        if let Some(idx) = (0..64).find(|&i| (self.piece_on_sq[i] != EMPTY_SQ) != (seen >> i & 1 == 1)) {
            return Err(PositionError::MailboxMismatch { square: Square::from_index(idx as u8) });
        }
        Ok(())
    }

    /// Panics when the incremental fingerprint has drifted from a full recompute.
    #[track_caller]
    pub fn assert_hash(&self) {
        let full = self.compute_fingerprint_full();
        assert_eq!(
            self.fingerprint(),
            full,
            "Zobrist parity mismatch: stored={:#018x}, full={:#018x}",
            self.fingerprint(),
            full
        );
    }
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Decode a 0/1 value into a Color.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Color::White,
            1 => Color::Black,
            _ => panic!("Invalid Color encoding: {}", v),
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Decode a 0–5 value into a Piece.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            5 => Piece::King,
            _ => panic!("Invalid Piece encoding: {}", v),
        }
    }
}

/// An empty board (no pieces) with White to move.
impl Default for Position {
    fn default() -> Self {
        Position::new_empty()
    }
}

/// Same placement, side, rights, en passant and clocks. The checkers cache
/// is not compared.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.piece_on_sq == other.piece_on_sq
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Position {}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
