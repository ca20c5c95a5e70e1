pub mod board;
pub mod castling;
pub mod check;
pub mod en_passant;
pub mod game;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod types;

pub use board::BoardState;
pub use castling::CastleSides;
pub use game::{Game, GameSettings, MoveOutcome};
pub use history::{MoveHistory, MoveLogEntry};
pub use movegen::{legal_destinations, pseudo_legal};
pub use types::*;
