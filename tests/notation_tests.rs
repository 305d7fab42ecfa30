use chess_position::board::{Color, Piece, Position};
use chess_position::moves::{Move, MoveKind};
use chess_position::notation::*;
use chess_position::square::Square;

#[test]
fn glyphs_for_every_piece() {
    for color in Color::ALL {
        for piece in Piece::ALL {
            let glyph = piece_to_glyph(color, piece);
            assert_eq!(piece_from_glyph(glyph), Some((color, piece)));
            assert_eq!(glyph.is_ascii_uppercase(), color == Color::White);
            assert_eq!(piece_type_from_glyph(glyph), Some(piece));
            assert_eq!(piece_type_to_glyph(piece), glyph.to_ascii_uppercase());
        }
    }
    assert_eq!(piece_from_glyph('x'), None);
    assert_eq!(piece_type_from_glyph('1'), None);
}

#[test]
fn player_glyphs_and_labels() {
    assert_eq!(player_to_glyph(Color::White), 'w');
    assert_eq!(player_from_glyph('b'), Some(Color::Black));
    assert_eq!(player_from_glyph('x'), None);
    assert_eq!(player_label(Color::Black), "Black");
    assert_eq!(piece_label(Color::White, Piece::Queen), "White Queen");
    assert_eq!(piece_label(Color::Black, Piece::Knight), "Black Knight");
    assert_eq!(piece_type_label(Piece::Bishop), "Bishop");
    assert_eq!(format!("{} {}", Color::White, Piece::Rook), "White Rook");
}

#[test]
fn castle_strings() {
    assert_eq!(STR_CASTLE_SHORT, "O-O");
    assert_eq!(STR_CASTLE_LONG, "O-O-O");
    assert_eq!(STR_DASH, "-");
}

#[test]
fn move_values_serialize() {
    let pos = Position::new();
    let mv = Move::for_position(&pos, Square::E1, Square::G1, MoveKind::Castle);
    let bytes = bincode::serialize(&mv).unwrap();
    let back: Move = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, mv);
    assert!(back.is_kingside_castle());
    assert_eq!(back.origin_hash, pos.fingerprint());

    let sq_bytes = bincode::serialize(&Square::H8).unwrap();
    assert_eq!(bincode::deserialize::<String>(&sq_bytes).unwrap(), "h8");
}

#[cfg(feature = "logging")]
#[test]
fn logging_bootstraps_once() {
    let dir = std::env::temp_dir().join("chess_position_logs");
    let path = dir.join("notation_tests.log");
    chess_position::logger::init_logging(&path, "chess_position=debug").unwrap();
    // rejected input emits a debug event through the installed subscriber
    assert!(Position::from_fen("not a fen").is_err());
    chess_position::logger::init_logging(&path, "chess_position=trace").unwrap();
    assert!(path.exists());
}
