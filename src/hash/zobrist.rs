// src/hash/zobrist.rs

use crate::board::castle_bits::*;
use crate::board::{Color, Piece};
use crate::square::Square;
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

pub struct ZobristKeys {
    /// [color][piece][square] with {White=0, Black=1} and {P,N,B,R,Q,K}={0..5}
    pub piece: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move.
    pub side_to_move: u64,
    /// [0]=K, [1]=Q, [2]=k, [3]=q  (bit order K,Q,k,q)
    pub castling: [u64; 4],
    /// a..h => 0..7
    pub ep_file: [u64; 8],
}

// Global keys, initialized on first use and never mutated afterwards.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_zobrist_keys_with_rng(make_zobrist_rng()))
}

#[inline(always)]
pub fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    zobrist_keys().piece[color as usize][piece as usize][sq.index() as usize]
}

/// Hash of everything that is not placement: castling rights, the en passant
/// file (when a target is set) and the side to move.
pub fn extra_hash(castling: CastleBits, en_passant: Option<Square>, side: Color) -> u64 {
    let keys = zobrist_keys();
    let mut hash = 0u64;

    for (i, key) in keys.castling.iter().enumerate() {
        if castling & (1 << i) != 0 {
            hash ^= key;
        }
    }

    if let Some(ep) = en_passant {
        hash ^= keys.ep_file[ep.file() as usize];
    }

    if side == Color::Black {
        hash ^= keys.side_to_move;
    }

    hash
}

fn generate_zobrist_keys_with_rng(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys: XOR-ing a zero key would make a feature invisible
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 4],
        ep_file: [0u64; 8],
    };

    for by_piece in keys.piece.iter_mut() {
        for by_square in by_piece.iter_mut() {
            for key in by_square.iter_mut() {
                *key = non_zero(&mut rng);
            }
        }
    }

    for key in keys.castling.iter_mut() {
        *key = non_zero(&mut rng);
    }

    for key in keys.ep_file.iter_mut() {
        *key = non_zero(&mut rng);
    }

    keys.side_to_move = non_zero(&mut rng);

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_non_zero_and_distinct() {
        let keys = zobrist_keys();
        let mut seen = HashSet::new();
        for c in 0..2 {
            for p in 0..6 {
                for sq in 0..64 {
                    let k = keys.piece[c][p][sq];
                    assert_ne!(k, 0);
                    seen.insert(k);
                }
            }
        }
        seen.extend(keys.castling);
        seen.extend(keys.ep_file);
        seen.insert(keys.side_to_move);
        assert_eq!(seen.len(), 768 + 4 + 8 + 1);
    }

    #[test]
    fn extra_hash_composes_by_xor() {
        let keys = zobrist_keys();
        assert_eq!(extra_hash(CASTLE_NONE, None, Color::White), 0);
        assert_eq!(extra_hash(CASTLE_NONE, None, Color::Black), keys.side_to_move);
        assert_eq!(
            extra_hash(CASTLE_WK | CASTLE_BQ, None, Color::White),
            keys.castling[0] ^ keys.castling[3]
        );
        let e3 = Square::from_index(20);
        assert_eq!(
            extra_hash(CASTLE_NONE, Some(e3), Color::Black),
            keys.ep_file[4] ^ keys.side_to_move
        );
    }
}
