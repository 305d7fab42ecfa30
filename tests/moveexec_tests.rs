use chess_position::board::{CASTLE_ALL, CASTLE_BLACK, CASTLE_NONE, CASTLE_WK, Color, Piece, Position};
use chess_position::moves::execute::apply_move;
use chess_position::moves::{IllegalMoveError, Move, MoveKind};
use chess_position::square::Square;
use std::str::FromStr;

fn sq(s: &str) -> Square {
    Square::from_str(s).unwrap()
}

/// Binds a move to `pos` and plays it.
fn play(pos: &mut Position, from: &str, to: &str, kind: MoveKind) {
    let mv = Move::for_position(pos, sq(from), sq(to), kind);
    pos.apply_move(mv).unwrap();
    assert!(pos.validate().is_ok());
    assert_eq!(pos.fingerprint(), pos.compute_fingerprint_full(), "after {mv}");
}

#[test]
fn double_push_from_start() {
    let mut pos = Position::new();
    play(&mut pos, "e2", "e4", MoveKind::DoublePush);

    assert_eq!(pos.en_passant(), Some(sq("e3")));
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
}

#[test]
fn en_passant_square_lasts_one_ply() {
    let mut pos = Position::new();
    play(&mut pos, "e2", "e4", MoveKind::DoublePush);
    play(&mut pos, "g8", "f6", MoveKind::Normal);
    assert_eq!(pos.en_passant(), None);
    assert_eq!(pos.halfmove_clock(), 1);
    assert_eq!(pos.fullmove_number(), 2);
}

#[test]
fn en_passant_capture_removes_passed_pawn() {
    let mut pos = Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3").unwrap();
    play(&mut pos, "d4", "e3", MoveKind::EnPassant);

    assert_eq!(pos.piece_at(sq("e3")), Some((Color::Black, Piece::Pawn)));
    assert!(pos.is_empty(sq("e4")));
    assert!(pos.is_empty(sq("d4")));
    assert_eq!(pos.pieces(Piece::Pawn, Color::White).count_ones(), 7);
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 4);
}

#[test]
fn white_castles_both_ways() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 20";

    let mut short = Position::from_fen(fen).unwrap();
    play(&mut short, "e1", "g1", MoveKind::Castle);
    assert_eq!(short.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(short.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert!(short.is_empty(Square::H1));
    assert_eq!(short.castling_rights(), CASTLE_BLACK);
    assert_eq!(short.halfmove_clock(), 6);

    let mut long = Position::from_fen(fen).unwrap();
    play(&mut long, "e1", "c1", MoveKind::Castle);
    assert_eq!(long.piece_at(Square::C1), Some((Color::White, Piece::King)));
    assert_eq!(long.piece_at(Square::D1), Some((Color::White, Piece::Rook)));
    assert!(long.is_empty(Square::A1));
    assert_eq!(long.castling_rights(), CASTLE_BLACK);
}

#[test]
fn black_castles_long() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    play(&mut pos, "e8", "c8", MoveKind::Castle);
    assert_eq!(pos.piece_at(Square::C8), Some((Color::Black, Piece::King)));
    assert_eq!(pos.piece_at(Square::D8), Some((Color::Black, Piece::Rook)));
    assert!(pos.is_empty(Square::A8));
    assert_eq!(pos.castling_rights(), CASTLE_ALL & !CASTLE_BLACK);
    assert_eq!(pos.fullmove_number(), 2);
}

#[test]
fn rook_move_revokes_only_its_side() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut pos, "a1", "a4", MoveKind::Normal);
    assert_eq!(pos.castling_rights(), CASTLE_WK | CASTLE_BLACK);
}

#[test]
fn every_promotion_kind() {
    let fen = "1n2k3/P7/8/8/8/8/8/4K3 w - - 7 30";
    let kinds = [
        (MoveKind::PromoteQueen, Piece::Queen),
        (MoveKind::PromoteRook, Piece::Rook),
        (MoveKind::PromoteBishop, Piece::Bishop),
        (MoveKind::PromoteKnight, Piece::Knight),
    ];
    for (kind, piece) in kinds {
        let mut pos = Position::from_fen(fen).unwrap();
        play(&mut pos, "a7", "a8", kind);
        assert_eq!(pos.piece_at(Square::A8), Some((Color::White, piece)));
        assert_eq!(pos.pieces(Piece::Pawn, Color::White), 0);
        assert_eq!(pos.halfmove_clock(), 0);

        // capturing promotion
        let mut pos = Position::from_fen(fen).unwrap();
        play(&mut pos, "a7", "b8", kind);
        assert_eq!(pos.piece_at(sq("b8")), Some((Color::White, piece)));
        assert_eq!(pos.pieces(Piece::Knight, Color::Black), 0);
    }
}

#[test]
fn stale_move_is_rejected_without_change() {
    let mut pos = Position::new();
    let stale = Move::for_position(&pos, sq("e2"), sq("e4"), MoveKind::DoublePush);
    play(&mut pos, "g1", "f3", MoveKind::Normal);

    let before = pos.clone();
    let err = pos.apply_move(stale).unwrap_err();
    assert_eq!(
        err,
        IllegalMoveError {
            expected: before.fingerprint(),
            found: stale.origin_hash
        }
    );
    assert_eq!(pos, before);
    assert_eq!(pos.fingerprint(), before.fingerprint());
    assert!(!pos.is_legal(stale));
    assert!(apply_move(&mut pos, stale).is_err());
}

#[test]
fn after_move_leaves_source_alone() {
    let start = Position::new();
    let mv = Move::for_position(&start, sq("d2"), sq("d4"), MoveKind::DoublePush);
    let next = start.after_move(mv).unwrap();
    assert_eq!(start, Position::new());
    assert_eq!(next.en_passant(), Some(sq("d3")));
    assert_ne!(next.fingerprint(), start.fingerprint());
    assert!(next.after_move(mv).is_err());
}

#[test]
fn chained_application() {
    let mut pos = Position::new();
    let m1 = Move::for_position(&pos, sq("e2"), sq("e4"), MoveKind::DoublePush);
    let after_first = pos.after_move(m1).unwrap();
    let m2 = Move::for_position(&after_first, sq("e7"), sq("e5"), MoveKind::DoublePush);

    pos.apply_move(m1).unwrap().apply_move(m2).unwrap();
    assert_eq!(pos.en_passant(), Some(sq("e6")));
    assert_eq!(pos.fullmove_number(), 2);
    assert_eq!(pos.side_to_move(), Color::White);
}

#[test]
fn king_walk_clears_rights_for_good() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut pos, "e1", "e2", MoveKind::Normal);
    play(&mut pos, "e8", "e7", MoveKind::Normal);
    play(&mut pos, "e2", "e1", MoveKind::Normal);
    play(&mut pos, "e7", "e8", MoveKind::Normal);
    assert_eq!(pos.castling_rights(), CASTLE_NONE);
    assert_eq!(pos.halfmove_clock(), 4);
    // board is back where it started but the rights are not
    assert_ne!(pos.fingerprint(), Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap().fingerprint());
}
