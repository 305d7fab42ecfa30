use crate::board::castle_bits::CASTLE_REVOKE;
use crate::board::{Color, Piece, Position};
use crate::moves::types::{Move, MoveKind};
use crate::square::Square;
use thiserror::Error;
use tracing::{trace, warn};

/// A move bound to a different position than the one it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("move was made for position {found:#018x}, current position is {expected:#018x}")]
pub struct IllegalMoveError {
    /// Fingerprint of the position the move was offered to.
    pub expected: u64,
    /// Origin hash carried by the move.
    pub found: u64,
}

/// Rook (from, to) for a castling king landing on `king_to`.
#[inline(always)]
fn rook_castle_squares(king_from: Square, king_to: Square) -> (Square, Square) {
    let to = king_to.index();
    if king_to > king_from {
        (Square::from_index(to + 1), Square::from_index(to - 1))
    } else {
        (Square::from_index(to - 2), Square::from_index(to + 1))
    }
}

/// Applies `mv` to `pos` in place. On error `pos` is left untouched.
pub fn apply_move(pos: &mut Position, mv: Move) -> Result<(), IllegalMoveError> {
    let expected = pos.fingerprint();
    if mv.origin_hash != expected {
        warn!(%mv, expected, found = mv.origin_hash, "stale move rejected");
        return Err(IllegalMoveError {
            expected,
            found: mv.origin_hash,
        });
    }

    let color = pos.side_to_move;
    let from = mv.from;
    let to = mv.to;

    // Captures and pawn moves reset the fifty-move clock
    if pos.take_piece(to).is_some() || pos.piece_type_at(from) == Some(Piece::Pawn) {
        pos.halfmove_clock = 0;
    } else {
        pos.halfmove_clock = pos.halfmove_clock.saturating_add(1);
    }

    pos.invalidate_checkers();
    pos.en_passant = None;

    match mv.kind.promotion() {
        Some(promo) => {
            pos.take_piece(from);
            pos.put_piece(to, color, promo);
        }
        None => {
            pos.shift_piece(from, to);
            match mv.kind {
                MoveKind::DoublePush => {
                    pos.en_passant = Some(Square::from_index((from.index() + to.index()) / 2));
                }
                MoveKind::Castle => {
                    let (rook_from, rook_to) = rook_castle_squares(from, to);
                    pos.shift_piece(rook_from, rook_to);
                }
                MoveKind::EnPassant => {
                    // the captured pawn sits beside the origin, on the destination file
                    pos.take_piece(Square::from_rank_file(from.rank(), to.file()));
                }
                _ => {}
            }
        }
    }

    pos.castling_rights &= CASTLE_REVOKE[from.index() as usize] & CASTLE_REVOKE[to.index() as usize];

    pos.side_to_move = !color;
    if pos.side_to_move == Color::White {
        pos.fullmove_number = pos.fullmove_number.saturating_add(1);
    }

    pos.refresh_extra_hash();

    trace!(%mv, fingerprint = pos.fingerprint(), "applied");

    #[cfg(any(debug_assertions, feature = "paranoid_hash"))]
    pos.assert_hash();

    Ok(())
}

impl Position {
    /// True when `mv` was generated against this exact position.
    #[inline(always)]
    pub fn is_legal(&self, mv: Move) -> bool {
        mv.origin_hash == self.fingerprint()
    }

    /// Plays `mv`, returning `self` for chaining.
    pub fn apply_move(&mut self, mv: Move) -> Result<&mut Self, IllegalMoveError> {
        apply_move(self, mv)?;
        Ok(self)
    }

    /// The position reached by playing `mv` from this one.
    pub fn after_move(&self, mv: Move) -> Result<Position, IllegalMoveError> {
        let mut next = self.clone();
        apply_move(&mut next, mv)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::castle_bits::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn rook_squares_for_each_corner() {
        assert_eq!(rook_castle_squares(Square::E1, Square::G1), (Square::H1, Square::F1));
        assert_eq!(rook_castle_squares(Square::E1, Square::C1), (Square::A1, Square::D1));
        assert_eq!(rook_castle_squares(Square::E8, Square::G8), (Square::H8, Square::F8));
        assert_eq!(rook_castle_squares(Square::E8, Square::C8), (Square::A8, Square::D8));
    }

    #[test]
    fn quiet_piece_move_ticks_clock() {
        let mut pos = Position::new();
        let mv = Move::for_position(&pos, sq("g1"), sq("f3"), MoveKind::Normal);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.side_to_move(), Color::Black);

        let mv = Move::for_position(&pos, sq("g8"), sq("f6"), MoveKind::Normal);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.halfmove_clock(), 2);
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn rook_capture_on_corner_revokes_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        let mv = Move::for_position(&pos, Square::A1, Square::A8, MoveKind::Normal);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.castling_rights(), CASTLE_WK | CASTLE_BK);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.piece_at(Square::A8), Some((Color::White, Piece::Rook)));
    }

    #[test]
    fn promotion_replaces_pawn_with_chosen_piece() {
        let fen = "4k3/1P6/8/8/8/8/6p1/4K2R b K - 4 40";
        for kind in [
            MoveKind::PromoteQueen,
            MoveKind::PromoteRook,
            MoveKind::PromoteBishop,
            MoveKind::PromoteKnight,
        ] {
            // black pawn takes the h1 rook while promoting; the white right goes with it
            let mut pos = Position::from_fen(fen).unwrap();
            let mv = Move::for_position(&pos, sq("g2"), Square::H1, kind);
            pos.apply_move(mv).unwrap();
            assert_eq!(pos.piece_at(Square::H1), Some((Color::Black, kind.promotion().unwrap())));
            assert!(pos.is_empty(sq("g2")));
            assert_eq!(pos.pieces(Piece::Pawn, Color::Black), 0);
            assert_eq!(pos.castling_rights(), CASTLE_NONE);
            assert_eq!(pos.halfmove_clock(), 0);
            assert_eq!(pos.fullmove_number(), 41);
            pos.assert_hash();
        }
    }

    #[test]
    fn parity_holds_across_every_kind() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/4p3/8/3P4/R3K2R w KQkq - 0 1").unwrap();
        let line = [
            (sq("d2"), sq("d4"), MoveKind::DoublePush),
            (sq("e4"), sq("d3"), MoveKind::EnPassant),
            (Square::E1, Square::G1, MoveKind::Castle),
            (sq("d3"), sq("d2"), MoveKind::Normal),
            (Square::F1, sq("f2"), MoveKind::Normal),
            (sq("d2"), sq("d1"), MoveKind::PromoteKnight),
        ];
        for (from, to, kind) in line {
            let mv = Move::for_position(&pos, from, to, kind);
            pos.apply_move(mv).unwrap();
            pos.assert_hash();
        }
        assert_eq!(pos.piece_at(sq("d1")), Some((Color::Black, Piece::Knight)));
        assert_eq!(pos.castling_rights(), CASTLE_BLACK);
    }

    #[test]
    #[should_panic(expected = "Zobrist parity mismatch")]
    fn drifted_fingerprint_is_caught() {
        let mut pos = Position::new();
        pos.hash_extra ^= 1;
        pos.assert_hash();
    }

    #[test]
    fn stale_move_reports_both_hashes() {
        let mut pos = Position::new();
        let mv = Move::new(sq("e2"), sq("e4"), MoveKind::DoublePush, 0xDEAD);
        let err = pos.apply_move(mv).unwrap_err();
        assert_eq!(err.found, 0xDEAD);
        assert_eq!(err.expected, Position::new().fingerprint());
        assert_eq!(pos, Position::new());
    }
}
