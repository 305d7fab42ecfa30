// src/bitboard.rs
// Bitboards are plain `u64`s: bit i set <=> square i (a1 = 0 … h8 = 63).

use crate::square::Square;
use crate::utils::pop_lsb;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

#[inline(always)]
pub const fn rank_mask(rank: u8) -> u64 {
    RANK_1 << (rank * 8)
}

#[inline(always)]
pub const fn file_mask(file: u8) -> u64 {
    FILE_A << file
}

pub trait BitboardExt {
    /// Index of the lowest set bit. Undefined (64) for an empty board.
    fn lsb(self) -> u8;
    /// Index of the highest set bit. Undefined for an empty board.
    fn msb(self) -> u8;
    fn is_singleton(self) -> bool;
    fn squares(self) -> SquareIter;
}

impl BitboardExt for u64 {
    #[inline(always)]
    fn lsb(self) -> u8 {
        self.trailing_zeros() as u8
    }

    #[inline(always)]
    fn msb(self) -> u8 {
        63u8.wrapping_sub(self.leading_zeros() as u8)
    }

    #[inline(always)]
    fn is_singleton(self) -> bool {
        self != 0 && self & (self - 1) == 0
    }

    #[inline(always)]
    fn squares(self) -> SquareIter {
        SquareIter(self)
    }
}

/// Iterates set squares from a1 upward.
pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        Some(Square::from_index(pop_lsb(&mut self.0)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}
