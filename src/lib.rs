//! Chess rules engine.
//!
//! Given a board position and a piece to move, the engine computes legal
//! destination squares, executes moves (castling and en passant included),
//! detects check, checkmate and stalemate, and keeps a navigable, notated
//! move history. Rendering, input handling, persistence, and computer
//! opponents are consumers of this API, not part of it.
//!
//! ```
//! use chess_rules::engine::{Game, Square};
//!
//! let mut game = Game::new();
//! let from = Square::from_algebraic("e2").unwrap();
//! let to = Square::from_algebraic("e4").unwrap();
//! assert!(game.legal_destinations(from).contains(&to));
//! let outcome = game.attempt_move(from, to).unwrap();
//! assert!(!outcome.entry.capture);
//! ```

pub mod engine;
