// src/board/fen.rs
// FEN / EPD codec and the mirror transform.

use super::castle_bits::*;
use super::{Color, Position};
use crate::notation::{STR_DASH, piece_code_to_glyph, piece_from_glyph, player_from_glyph, player_to_glyph};
use crate::square::Square;
use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const FEN_INITIAL: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a FEN/EPD string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    FieldCount(usize),
    #[error("unexpected character '{0}' in piece placement")]
    UnexpectedGlyph(char),
    #[error("rank separator at rank {rank}, file {file}")]
    MisplacedSeparator { rank: u8, file: u8 },
    #[error("rank {rank} describes more than 8 files")]
    RankOverflow { rank: u8 },
    #[error("piece placement stops at rank {rank}, file {file}")]
    IncompletePlacement { rank: u8, file: u8 },
    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),
    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),
    #[error("castling flag '{0}' given twice")]
    DuplicateCastling(char),
    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("invalid half-move clock '{0}'")]
    InvalidHalfmoveClock(String),
    #[error("invalid full-move number '{0}'")]
    InvalidFullmoveNumber(String),
}

/// True if `text` decodes as a FEN or EPD record.
pub fn is_valid_fen(text: &str) -> bool {
    Position::from_fen(text).is_ok()
}

fn parse_placement(pos: &mut Position, field: &str) -> Result<(), FenError> {
    let mut rank: u8 = 7;
    let mut file: u8 = 0;

    for ch in field.chars() {
        match ch {
            '1'..='8' => {
                file += ch as u8 - b'0';
                if file > 8 {
                    return Err(FenError::RankOverflow { rank });
                }
            }
            '/' => {
                if file != 8 || rank == 0 {
                    return Err(FenError::MisplacedSeparator { rank, file });
                }
                rank -= 1;
                file = 0;
            }
            _ => {
                let (color, piece) = piece_from_glyph(ch).ok_or(FenError::UnexpectedGlyph(ch))?;
                if file >= 8 {
                    return Err(FenError::RankOverflow { rank });
                }
                pos.put_piece(Square::from_rank_file(rank, file), color, piece);
                file += 1;
            }
        }
    }

    if rank != 0 || file != 8 {
        return Err(FenError::IncompletePlacement { rank, file });
    }
    Ok(())
}

fn parse_side_to_move(field: &str) -> Result<Color, FenError> {
    let mut chars = field.chars();
    match (chars.next().and_then(player_from_glyph), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(FenError::InvalidSideToMove(field.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<CastleBits, FenError> {
    if field == STR_DASH {
        return Ok(CASTLE_NONE);
    }
    let mut rights = CASTLE_NONE;
    for ch in field.chars() {
        let flag = match ch {
            'K' => CASTLE_WK,
            'Q' => CASTLE_WQ,
            'k' => CASTLE_BK,
            'q' => CASTLE_BQ,
            _ => return Err(FenError::InvalidCastling(field.to_string())),
        };
        if rights & flag != 0 {
            return Err(FenError::DuplicateCastling(ch));
        }
        rights |= flag;
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, mover: Color) -> Result<Option<Square>, FenError> {
    if field == STR_DASH {
        return Ok(None);
    }
    let sq = Square::from_str(field).map_err(|_| FenError::InvalidEnPassant(field.to_string()))?;
    let expected_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(FenError::InvalidEnPassant(field.to_string()));
    }
    Ok(Some(sq))
}

fn parse_fen(text: &str) -> Result<Position, FenError> {
    // anything past the six FEN fields (EPD operations, comments) is ignored
    let fields: ArrayVec<&str, 6> = text.split_whitespace().take(6).collect();
    if fields.len() < 4 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut pos = Position::new_empty();
    parse_placement(&mut pos, fields[0])?;

    let mover = parse_side_to_move(fields[1])?;
    pos.set_side_to_move(mover);

    // rights and ep square go through the setters so unsupported ones drop out
    pos.set_castling_rights(parse_castling(fields[2])?);
    pos.set_en_passant(parse_en_passant(fields[3], mover)?);

    if let Some(&field) = fields.get(4) {
        let clock = field
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(field.to_string()))?;
        pos.set_halfmove_clock(clock);
    }
    if let Some(&field) = fields.get(5) {
        let number = field
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(field.to_string()))?;
        pos.set_fullmove_number(number);
    }

    Ok(pos)
}

impl Position {
    /// Decodes a FEN record. EPD (the first four fields) is accepted too,
    /// with the clocks defaulting to 0 and 1.
    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        parse_fen(text).inspect_err(|err| debug!(%err, fen = text, "rejected FEN"))
    }

    /// Placement, mover, castling and en passant fields.
    pub fn to_epd(&self) -> String {
        let mut out = String::with_capacity(80);

        for rank in (0..8u8).rev() {
            let mut skip = 0u32;
            for file in 0..8u8 {
                let code = self.piece_on_sq[Square::from_rank_file(rank, file).index() as usize];
                match piece_code_to_glyph(code) {
                    '\0' => skip += 1,
                    glyph => {
                        if skip > 0 {
                            out.push_str(&skip.to_string());
                            skip = 0;
                        }
                        out.push(glyph);
                    }
                }
            }
            if skip > 0 {
                out.push_str(&skip.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(player_to_glyph(self.side_to_move));

        out.push(' ');
        if self.castling_rights == CASTLE_NONE {
            out.push_str(STR_DASH);
        } else {
            for (flag, glyph) in [(CASTLE_WK, 'K'), (CASTLE_WQ, 'Q'), (CASTLE_BK, 'k'), (CASTLE_BQ, 'q')] {
                if self.has_castling(flag) {
                    out.push(glyph);
                }
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push_str(STR_DASH),
        }

        out
    }

    /// Full six-field FEN.
    pub fn to_fen(&self) -> String {
        format!("{} {} {}", self.to_epd(), self.halfmove_clock, self.fullmove_number)
    }

    /// Color-flipped copy: every piece reflected across the middle rank and
    /// recolored, castling rights swapped, mover flipped. Clocks are reset.
    pub fn mirrored(&self) -> Position {
        let mut pos = Position::new_empty();
        for (idx, &code) in self.piece_on_sq.iter().enumerate() {
            if let Some((color, piece)) = super::decode_piece(code) {
                pos.put_piece(Square::from_index(idx as u8).mirror(), !color, piece);
            }
        }
        pos.set_castling_rights(mirror_castling(self.castling_rights));
        pos.set_side_to_move(!self.side_to_move);
        // mover is already flipped, so the reflected square validates
        pos.set_en_passant(self.en_passant.map(Square::mirror));
        pos
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Position::from_fen(&text).map_err(serde::de::Error::custom)
    }
}
