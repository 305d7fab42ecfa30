use crate::board::{Piece, Position};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a move rearranges the board. Capture is implied by an occupied
/// destination and needs no kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    /// Pawn advance of two ranks; leaves an en passant target behind.
    DoublePush,
    /// King move of two files; the rook follows.
    Castle,
    EnPassant,
    PromoteQueen,
    PromoteRook,
    PromoteBishop,
    PromoteKnight,
}

impl MoveKind {
    #[inline(always)]
    pub fn promotion(self) -> Option<Piece> {
        match self {
            MoveKind::PromoteQueen => Some(Piece::Queen),
            MoveKind::PromoteRook => Some(Piece::Rook),
            MoveKind::PromoteBishop => Some(Piece::Bishop),
            MoveKind::PromoteKnight => Some(Piece::Knight),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        self.promotion().is_some()
    }
}

/// A move bound to the position it was generated against.
///
/// `origin_hash` is that position's fingerprint; a position only accepts
/// moves whose origin hash equals its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub origin_hash: u64,
}

impl Move {
    #[inline(always)]
    pub fn new(from: Square, to: Square, kind: MoveKind, origin_hash: u64) -> Self {
        Move {
            from,
            to,
            kind,
            origin_hash,
        }
    }

    /// Binds a move to the current fingerprint of `pos`.
    #[inline(always)]
    pub fn for_position(pos: &Position, from: Square, to: Square, kind: MoveKind) -> Self {
        Move::new(from, to, kind, pos.fingerprint())
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.kind == MoveKind::Castle
    }

    #[inline(always)]
    pub fn is_kingside_castle(&self) -> bool {
        self.is_castling() && self.to > self.from
    }

    #[inline(always)]
    pub fn is_queenside_castle(&self) -> bool {
        self.is_castling() && self.to < self.from
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.kind.is_promotion()
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.kind == MoveKind::DoublePush
    }

    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // from->to like e2e4
        write!(f, "{}{}", self.from, self.to)?;

        // promotion piece, lowercase for UCI style
        if let Some(promo) = self.kind.promotion() {
            let c = match promo {
                Piece::Queen => 'q',
                Piece::Rook => 'r',
                Piece::Bishop => 'b',
                _ => 'n',
            };
            write!(f, "{c}")?;
        }

        // "{:#}" adds a tag for special moves
        if f.alternate() {
            match self.kind {
                MoveKind::Castle => f.write_str(" (castle)")?,
                MoveKind::EnPassant => f.write_str(" (ep)")?,
                MoveKind::DoublePush => f.write_str(" (double)")?,
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn uci_text_includes_promotion() {
        let mv = Move::new(sq("e7"), sq("e8"), MoveKind::PromoteKnight, 0);
        assert_eq!(mv.to_uci(), "e7e8n");
        let mv = Move::new(sq("a2"), sq("b1"), MoveKind::PromoteQueen, 0);
        assert_eq!(mv.to_string(), "a2b1q");
    }

    #[test]
    fn alternate_format_tags_special_moves() {
        let castle = Move::new(Square::E1, Square::G1, MoveKind::Castle, 0);
        assert_eq!(format!("{castle:#}"), "e1g1 (castle)");
        assert!(castle.is_kingside_castle());
        assert!(!castle.is_queenside_castle());

        let ep = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant, 0);
        assert_eq!(format!("{ep:#}"), "e5d6 (ep)");
    }

    #[test]
    fn promotion_kinds_map_to_pieces() {
        assert_eq!(MoveKind::PromoteRook.promotion(), Some(Piece::Rook));
        assert_eq!(MoveKind::PromoteBishop.promotion(), Some(Piece::Bishop));
        assert_eq!(MoveKind::Normal.promotion(), None);
        assert!(!MoveKind::EnPassant.is_promotion());
    }
}
