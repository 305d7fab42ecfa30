// src/square.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A board square, 0 = a1 … 63 = h8 (file = idx % 8, rank = idx / 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// Builds a square from a raw index. Panics on anything past 63;
    /// use `Square::try_from` for untrusted input.
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        assert!(idx < 64, "square index out of range");
        Square(idx)
    }

    #[inline(always)]
    pub const fn from_rank_file(rank: u8, file: u8) -> Self {
        assert!(rank < 8 && file < 8, "rank/file out of range");
        Square(rank * 8 + file)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline(always)]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Vertical reflection: a1 <-> a8, e3 <-> e6.
    #[inline(always)]
    pub const fn mirror(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Square `delta` steps away (8 = one rank up), if it stays on the board.
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Square> {
        let idx = self.0 as i16 + delta as i16;
        if (0..64).contains(&idx) {
            Some(Square(idx as u8))
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        if idx < 64 {
            Ok(Square(idx))
        } else {
            Err(format!("square index {idx} out of range"))
        }
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parses algebraic names such as "e3".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square '{s}'"));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(format!("invalid square '{s}'"));
        }
        Ok(Square::from_rank_file(rank, file))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Square::from_str(&text).map_err(serde::de::Error::custom)
    }
}
