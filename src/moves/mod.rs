pub mod attacks;
pub mod execute;
pub mod oracle;
pub mod square_control;
pub mod types;

pub use attacks::{AttackTables, attack_tables};
pub use execute::IllegalMoveError;
pub use oracle::AttackOracle;
pub use types::{Move, MoveKind};
