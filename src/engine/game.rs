//! Stateful game controller.
//!
//! `Game` wires the board, move generation, check detection, castling,
//! en passant, notation, and history together behind the API a presentation
//! layer consumes: `legal_destinations`, `attempt_move`, `reset_board`, and
//! history navigation. It is single-threaded and synchronous; every
//! operation completes before the next request is accepted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::board::BoardState;
use crate::engine::history::{MoveHistory, MoveLogEntry};
use crate::engine::types::{ChessError, GameStatus, Piece, PieceKind, Square, Team};
use crate::engine::{castling, check, en_passant, movegen, notation};

use std::collections::BTreeSet;

// =========================================================================
// GameSettings
// =========================================================================

/// Presentation-facing game configuration.
#[derive(Clone, Debug)]
pub struct GameSettings {
    pub white_player: String,
    pub black_player: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            white_player: "Player".into(),
            black_player: "Player".into(),
        }
    }
}

// =========================================================================
// MoveOutcome
// =========================================================================

/// The result of a successfully executed move.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// The log entry recorded for this move (castle flag already applied).
    pub entry: MoveLogEntry,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// Status of the game for the side about to move next.
    pub status: GameStatus,
}

// =========================================================================
// Game
// =========================================================================

/// A complete chess game: board, history, status, and metadata.
#[derive(Clone, Debug)]
pub struct Game {
    board: BoardState,
    history: MoveHistory,
    status: GameStatus,
    /// Captured pieces in capture order (the graveyard).
    captured: Vec<Piece>,

    pub id: String,
    pub created_at: DateTime<Utc>,
    pub settings: GameSettings,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_settings(GameSettings::default())
    }

    pub fn with_settings(settings: GameSettings) -> Self {
        Game {
            board: BoardState::starting(),
            history: MoveHistory::new(),
            status: GameStatus::Ongoing,
            captured: Vec::new(),
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            settings,
        }
    }

    /// A game over an arbitrary position, for analysis and tests.
    pub fn from_board(board: BoardState) -> Self {
        let mut game = Game {
            board,
            history: MoveHistory::new(),
            status: GameStatus::Ongoing,
            captured: Vec::new(),
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            settings: GameSettings::default(),
        };
        game.status = game.compute_status();
        game
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Team {
        self.board.side_to_move()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Captured pieces in capture order.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Castling eligibility for a team's king, as (queenside, kingside).
    pub fn can_castle(&self, team: Team) -> castling::CastleSides {
        castling::can_castle(&self.board, self.board.king_square(team))
    }

    // -----------------------------------------------------------------
    // Legal destinations
    // -----------------------------------------------------------------

    /// The legal destination squares for the piece on `from`. Read-only;
    /// an empty square yields an empty set.
    pub fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        movegen::legal_destinations(&self.board, from, &self.history)
    }

    // -----------------------------------------------------------------
    // Move execution
    // -----------------------------------------------------------------

    /// Execute the move `from -> to` if legal.
    ///
    /// On rejection the board is left untouched. On success the board is
    /// mutated (including the rook half of a castle and the passed pawn of
    /// an en-passant capture), the move is logged, the turn advances, and
    /// the opponent's situation is re-evaluated.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status.to_string()));
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?;

        let turn = self.board.side_to_move();
        if piece.team != turn {
            return Err(ChessError::Rejected {
                from,
                to,
                reason: format!("it is {turn}'s turn"),
            });
        }

        if !self.legal_destinations(from).contains(&to) {
            return Err(ChessError::Rejected {
                from,
                to,
                reason: "not a legal destination".into(),
            });
        }

        // Log metadata is read off the pre-move board.
        let (file_ambiguous, rank_ambiguous) =
            notation::ambiguity_flags(&self.board, &self.history, from, to);
        let first_move = !piece.has_moved;
        let is_en_passant = piece.kind == PieceKind::Pawn
            && (to - from).file != 0
            && self.board.piece_at(to).is_none();

        let captured = if is_en_passant {
            // The passed pawn is removed, not the (empty) destination.
            let passed = en_passant::passed_pawn_square(to, piece.team);
            let captured = self.board.remove(passed);
            self.board.move_piece(from, to);
            captured
        } else {
            self.board.move_piece(from, to)
        };

        let mut entry = MoveLogEntry::new(from, to, piece.kind, piece.team);
        entry.capture = captured.is_some();
        entry.file_ambiguous = file_ambiguous;
        entry.rank_ambiguous = rank_ambiguous;
        entry.first_move = first_move;
        self.history.add_entry(entry);

        // A two-square king move is a castle: relocate the rook under the
        // same logical turn, and fold it into the king's entry.
        if piece.kind == PieceKind::King
            && let Some((rook_from, rook_to)) = castling::rook_shift(from, to)
        {
            self.board.move_piece(rook_from, rook_to);
            self.history.mark_most_recent_castled();
        }

        if let Some(captured) = captured {
            self.captured.push(captured);
        }

        let entry = *self.history.most_recent().expect("entry just logged");
        tracing::debug!(game = %self.id, "{entry} ({from} -> {to})");

        self.board.end_turn();
        self.status = self.compute_status();
        if self.status.is_game_over() {
            tracing::info!(game = %self.id, "game over: {}", self.status);
        }

        Ok(MoveOutcome {
            entry,
            captured,
            status: self.status,
        })
    }

    // -----------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------

    /// Restore the standard starting position: all 32 pieces on their
    /// canonical squares, `has_moved` cleared, empty history, White to move.
    pub fn reset_board(&mut self) {
        self.board.reset();
        self.history.clear();
        self.captured.clear();
        self.status = GameStatus::Ongoing;
        tracing::info!(game = %self.id, "board reset");
    }

    // -----------------------------------------------------------------
    // History navigation
    // -----------------------------------------------------------------

    /// Move the history cursor one entry back; no-op past the start.
    pub fn step_back(&mut self) -> Option<MoveLogEntry> {
        self.history.step_back().copied()
    }

    /// Move the history cursor one entry forward; no-op past the end.
    pub fn step_forward(&mut self) -> Option<MoveLogEntry> {
        self.history.step_forward().copied()
    }

    // -----------------------------------------------------------------
    // Status detection
    // -----------------------------------------------------------------

    /// Evaluate the side to move: checkmated, stalemated, in check, or free
    /// to continue. Runs after every completed move (castling included).
    fn compute_status(&self) -> GameStatus {
        let team = self.board.side_to_move();
        let in_check = check::is_in_check(&self.board, team);

        let has_moves = self.board.squares_of(team).any(|(from, _)| {
            !movegen::legal_destinations(&self.board, from, &self.history).is_empty()
        });

        if !has_moves {
            if in_check {
                return GameStatus::Checkmate(!team);
            }
            return GameStatus::Stalemate;
        }

        if in_check {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
