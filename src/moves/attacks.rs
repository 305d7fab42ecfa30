// Reference attack oracle: leaper masks, directional rays and a between-table,
// all built once on first use.

use crate::bitboard::BitboardExt;
use crate::board::Color;
use crate::moves::oracle::AttackOracle;
use crate::square::Square;
use crate::utils::square_index;
use once_cell::sync::OnceCell;

/// (rank step, file step) for N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Rays whose square indices grow away from the origin; the nearest blocker
/// on those is the lowest set bit, on the others the highest.
const ASCENDING: [bool; 8] = [true, true, true, false, false, false, false, true];

const ORTHOGONAL: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL: [usize; 4] = [1, 3, 5, 7];

const KNIGHT_STEPS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_STEPS: [(isize, isize); 8] = DIRECTIONS;

#[inline]
/// Walks from (rank, file) with `step` while on the board; `on_square`
/// returns false to stop early.
fn scan_ray<F>(mut rank: isize, mut file: isize, step: F, mut on_square: impl FnMut(usize) -> bool)
where
    F: Fn(isize, isize) -> (isize, isize),
{
    while (0..=7).contains(&rank) && (0..=7).contains(&file) {
        let sq = square_index(rank as usize, file as usize);
        if !on_square(sq) {
            break;
        }
        let (new_rank, new_file) = step(rank, file);
        rank = new_rank;
        file = new_file;
    }
}

fn leaper_mask(square: usize, steps: &[(isize, isize)]) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    steps
        .iter()
        .map(|&(dr, df)| (rank + dr, file + df))
        .filter(|(r, f)| (0..=7).contains(r) && (0..=7).contains(f))
        .fold(0u64, |acc, (r, f)| acc | 1u64 << square_index(r as usize, f as usize))
}

/// Slow scan-based slider attacks; used to build and cross-check the tables.
pub fn slider_attacks_per_square(square: usize, blockers: u64, dirs: &[usize]) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut attacks = 0u64;

    for &d in dirs {
        let (dr, df) = DIRECTIONS[d];
        scan_ray(rank + dr, file + df, |r, f| (r + dr, f + df), |sq| {
            attacks |= 1 << sq;
            (blockers >> sq) & 1 == 0 // stop if blocker found
        });
    }

    attacks
}

#[inline]
pub fn rook_attacks_per_square(square: usize, blockers: u64) -> u64 {
    slider_attacks_per_square(square, blockers, &ORTHOGONAL)
}

#[inline]
pub fn bishop_attacks_per_square(square: usize, blockers: u64) -> u64 {
    slider_attacks_per_square(square, blockers, &DIAGONAL)
}

pub struct AttackTables {
    knight: [u64; 64],
    king: [u64; 64],
    /// [color][square]
    pawn: [[u64; 64]; 2],
    /// [direction][square], empty-board rays excluding the origin
    rays: [[u64; 64]; 8],
    /// [a][b], squares strictly between a and b on a shared line
    between: Box<[[u64; 64]; 64]>,
}

impl AttackTables {
    pub fn new() -> Self {
        let mut tables = AttackTables {
            knight: [0; 64],
            king: [0; 64],
            pawn: [[0; 64]; 2],
            rays: [[0; 64]; 8],
            between: Box::new([[0; 64]; 64]),
        };

        for sq in 0..64 {
            tables.knight[sq] = leaper_mask(sq, &KNIGHT_STEPS);
            tables.king[sq] = leaper_mask(sq, &KING_STEPS);
            tables.pawn[Color::White as usize][sq] = leaper_mask(sq, &[(1, -1), (1, 1)]);
            tables.pawn[Color::Black as usize][sq] = leaper_mask(sq, &[(-1, -1), (-1, 1)]);

            let rank = (sq / 8) as isize;
            let file = (sq % 8) as isize;
            for (d, &(dr, df)) in DIRECTIONS.iter().enumerate() {
                let mut ray = 0u64;
                scan_ray(rank + dr, file + df, |r, f| (r + dr, f + df), |target| {
                    // everything collected so far lies strictly between sq and target
                    tables.between[sq][target] = ray;
                    ray |= 1 << target;
                    true
                });
                tables.rays[d][sq] = ray;
            }
        }

        tables
    }

    #[inline(always)]
    fn ray_attacks(&self, dir: usize, sq: usize, blockers: u64) -> u64 {
        let ray = self.rays[dir][sq];
        let hit = ray & blockers;
        if hit == 0 {
            return ray;
        }
        let first = if ASCENDING[dir] { hit.lsb() } else { hit.msb() };
        ray ^ self.rays[dir][first as usize]
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackOracle for AttackTables {
    #[inline(always)]
    fn knight_attacks(&self, sq: Square) -> u64 {
        self.knight[sq.index() as usize]
    }

    #[inline(always)]
    fn king_attacks(&self, sq: Square) -> u64 {
        self.king[sq.index() as usize]
    }

    #[inline(always)]
    fn pawn_attacks(&self, sq: Square, color: Color) -> u64 {
        self.pawn[color as usize][sq.index() as usize]
    }

    #[inline]
    fn bishop_attacks(&self, sq: Square, blockers: u64) -> u64 {
        let i = sq.index() as usize;
        DIAGONAL
            .iter()
            .fold(0, |acc, &d| acc | self.ray_attacks(d, i, blockers))
    }

    #[inline]
    fn rook_attacks(&self, sq: Square, blockers: u64) -> u64 {
        let i = sq.index() as usize;
        ORTHOGONAL
            .iter()
            .fold(0, |acc, &d| acc | self.ray_attacks(d, i, blockers))
    }

    #[inline(always)]
    fn squares_between(&self, a: Square, b: Square) -> u64 {
        self.between[a.index() as usize][b.index() as usize]
    }
}

/// Process-wide tables, built on first use.
pub fn attack_tables() -> &'static AttackTables {
    static TABLES: OnceCell<AttackTables> = OnceCell::new();
    TABLES.get_or_init(AttackTables::new)
}
