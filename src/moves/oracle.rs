use crate::board::{Color, Piece};
use crate::square::Square;

/// Answers "what does a piece on this square reach" questions for a given
/// occupancy. Positions consult an oracle for check, pin and candidate
/// queries but never build attack tables themselves.
pub trait AttackOracle {
    fn knight_attacks(&self, sq: Square) -> u64;

    fn king_attacks(&self, sq: Square) -> u64;

    /// Squares a pawn of `color` standing on `sq` attacks.
    fn pawn_attacks(&self, sq: Square, color: Color) -> u64;

    /// Diagonal reach from `sq`, stopping at (and including) the first blocker.
    fn bishop_attacks(&self, sq: Square, blockers: u64) -> u64;

    /// Orthogonal reach from `sq`, stopping at (and including) the first blocker.
    fn rook_attacks(&self, sq: Square, blockers: u64) -> u64;

    /// Squares strictly between `a` and `b` when they share a line, else empty.
    fn squares_between(&self, a: Square, b: Square) -> u64;

    #[inline]
    fn queen_attacks(&self, sq: Square, blockers: u64) -> u64 {
        self.bishop_attacks(sq, blockers) | self.rook_attacks(sq, blockers)
    }

    /// Everything a slider on `sq` could reach given `occupancy`.
    #[inline]
    fn sliding_reach_from(&self, sq: Square, occupancy: u64) -> u64 {
        self.queen_attacks(sq, occupancy)
    }

    /// Members of `candidates` that reach `target` along a diagonal.
    #[inline]
    fn diagonal_attackers(&self, target: Square, candidates: u64, blockers: u64) -> u64 {
        self.bishop_attacks(target, blockers) & candidates
    }

    /// Members of `candidates` that reach `target` along a rank or file.
    #[inline]
    fn lateral_attackers(&self, target: Square, candidates: u64, blockers: u64) -> u64 {
        self.rook_attacks(target, blockers) & candidates
    }

    /// Pieces of `color` (given as its six piece bitboards) attacking `target`,
    /// with sliders blocked by `blockers`.
    fn attackers_of(&self, target: Square, color: Color, by: &[u64; 6], blockers: u64) -> u64 {
        let pawn = by[Piece::Pawn as usize];
        let knight = by[Piece::Knight as usize];
        let bishop = by[Piece::Bishop as usize];
        let rook = by[Piece::Rook as usize];
        let queen = by[Piece::Queen as usize];
        let king = by[Piece::King as usize];

        // a pawn of `color` hits `target` from where an opposing pawn on `target` would hit
        (self.pawn_attacks(target, !color) & pawn)
            | (self.knight_attacks(target) & knight)
            | (self.king_attacks(target) & king)
            | self.diagonal_attackers(target, bishop | queen, blockers)
            | self.lateral_attackers(target, rook | queen, blockers)
    }
}
