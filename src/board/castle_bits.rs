// src/board/castle_bits.rs

/// Castling rights as a 4-bit set.
pub type CastleBits = u8;

pub const CASTLE_NONE: CastleBits = 0;
pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;

pub const CASTLE_WHITE: CastleBits = CASTLE_WK | CASTLE_WQ;
pub const CASTLE_BLACK: CastleBits = CASTLE_BK | CASTLE_BQ;
pub const CASTLE_ALL: CastleBits = CASTLE_WHITE | CASTLE_BLACK;

/// Rights that survive a move touching each square (as origin or destination).
/// Everything except the king and rook home squares keeps all rights.
pub const CASTLE_REVOKE: [CastleBits; 64] = {
    let mut t = [CASTLE_ALL; 64];
    t[0] &= !CASTLE_WQ; // a1
    t[4] &= !CASTLE_WHITE; // e1
    t[7] &= !CASTLE_WK; // h1
    t[56] &= !CASTLE_BQ; // a8
    t[60] &= !CASTLE_BLACK; // e8
    t[63] &= !CASTLE_BK; // h8
    t
};

/// Swaps the White and Black halves, for color-flipped positions.
#[inline(always)]
pub const fn mirror_castling(bits: CastleBits) -> CastleBits {
    ((bits & CASTLE_WHITE) << 2) | ((bits & CASTLE_BLACK) >> 2)
}
