pub mod bitboard;
pub mod board;
pub mod hash;
#[cfg(feature = "logging")]
pub mod logger;
pub mod moves;
pub mod notation;
pub mod square;
pub mod utils;
