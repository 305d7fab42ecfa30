use crate::bitboard::{BitboardExt, RANK_2, RANK_7};
use crate::board::{Color, Piece, Position};
use crate::moves::oracle::AttackOracle;
use crate::square::Square;

impl Position {
    /// Pieces of color `by` attacking `target` under the current occupancy.
    pub fn attackers_of<O: AttackOracle + ?Sized>(&self, target: Square, by: Color, oracle: &O) -> u64 {
        oracle.attackers_of(target, by, &self.piece_bb[by as usize], self.occ_all)
    }

    pub fn is_square_attacked<O: AttackOracle + ?Sized>(&self, target: Square, by: Color, oracle: &O) -> bool {
        self.attackers_of(target, by, oracle) != 0
    }

    /// Opposing pieces attacking the mover's king. Computed on first call
    /// after a change and cached until the next one. Without a king the
    /// answer is empty.
    pub fn checkers<O: AttackOracle + ?Sized>(&self, oracle: &O) -> u64 {
        if let Some(bb) = self.checkers.get() {
            return bb;
        }
        let us = self.side_to_move;
        let bb = self
            .king_square(us)
            .map_or(0, |king| self.attackers_of(king, !us, oracle));
        self.checkers.set(Some(bb));
        bb
    }

    #[inline]
    pub fn in_check<O: AttackOracle + ?Sized>(&self, oracle: &O) -> bool {
        self.checkers(oracle) != 0
    }

    /// Mover's pieces that are the sole blocker between an enemy slider and
    /// the mover's king. Empty while in check.
    pub fn pinned_pieces<O: AttackOracle + ?Sized>(&self, oracle: &O) -> u64 {
        if self.in_check(oracle) {
            return 0;
        }
        let us = self.side_to_move;
        let Some(king) = self.king_square(us) else {
            return 0;
        };
        let them = !us;
        let queens = self.bb(them, Piece::Queen);
        let their_pieces = self.occupancy(them);
        let ours = self.occupancy(us);

        // Enemy sliders that would hit the king if all our pieces were gone.
        // Adjacent ones have nothing in between and can never pin.
        let pinners = (oracle.diagonal_attackers(king, queens | self.bb(them, Piece::Bishop), their_pieces)
            | oracle.lateral_attackers(king, queens | self.bb(them, Piece::Rook), their_pieces))
            & !oracle.king_attacks(king);

        let mut pinned = 0u64;
        for pinner in pinners.squares() {
            let between = ours & oracle.squares_between(king, pinner);
            if between.is_singleton() {
                pinned |= between;
            }
        }
        pinned
    }

    /// Mover's pieces of type `piece` that could move to `dest`, ignoring pins
    /// and check.
    pub fn candidate_sources<O: AttackOracle + ?Sized>(&self, piece: Piece, dest: Square, oracle: &O) -> u64 {
        let us = self.side_to_move;
        let own = self.bb(us, piece);
        let occupied = self.occ_all;

        match piece {
            Piece::Pawn => {
                if self.en_passant == Some(dest) || !self.is_empty(dest) {
                    // capturing pawns stand where an enemy pawn on `dest` would attack
                    return own & oracle.pawn_attacks(dest, !us);
                }
                let target = dest.bit();
                let (single, double) = match us {
                    Color::White => {
                        let one = target >> 8;
                        let two = if one & occupied == 0 { (target >> 16) & RANK_2 } else { 0 };
                        (one, two)
                    }
                    Color::Black => {
                        let one = target << 8;
                        let two = if one & occupied == 0 { (target << 16) & RANK_7 } else { 0 };
                        (one, two)
                    }
                };
                own & (single | double)
            }
            Piece::Knight => own & oracle.knight_attacks(dest),
            Piece::Bishop => oracle.diagonal_attackers(dest, own, occupied),
            Piece::Rook => oracle.lateral_attackers(dest, own, occupied),
            Piece::Queen => own & oracle.sliding_reach_from(dest, occupied),
            Piece::King => {
                let mut sources = own & oracle.king_attacks(dest);
                // castling: king on its home square, `dest` two files away
                let (home, short, long) = match us {
                    Color::White => (Square::E1, Square::G1, Square::C1),
                    Color::Black => (Square::E8, Square::G8, Square::C8),
                };
                if dest == short || dest == long {
                    sources |= own & home.bit();
                }
                sources
            }
        }
    }
}
