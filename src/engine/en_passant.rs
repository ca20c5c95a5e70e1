//! En-passant eligibility.
//!
//! Eligibility is read off the move log, not stored on the board: the most
//! recent entry must be an opposing pawn's first move that advanced exactly
//! two ranks and landed immediately beside the capturing pawn. The window
//! is therefore a single ply wide by construction.

use crate::engine::board::BoardState;
use crate::engine::history::MoveHistory;
use crate::engine::types::{PieceKind, Square, Team};

/// The en-passant destination for the pawn on `pawn_sq`, if the capture is
/// available right now.
pub fn capturable_en_passant(
    board: &BoardState,
    pawn_sq: Square,
    history: &MoveHistory,
) -> Option<Square> {
    let pawn = board.piece_at(pawn_sq)?;
    if pawn.kind != PieceKind::Pawn {
        return None;
    }

    let last = history.most_recent()?;
    if last.piece != PieceKind::Pawn || last.team == pawn.team || !last.first_move {
        return None;
    }
    if (last.to - last.from).rank.abs() != 2 {
        return None;
    }

    // The double-stepped pawn must sit on the same rank, one file over.
    if last.to.rank() != pawn_sq.rank() {
        return None;
    }
    if (last.to.file() as i8 - pawn_sq.file() as i8).abs() != 1 {
        return None;
    }

    // Sanity: the logged pawn is still standing where the log says.
    let passed = board.piece_at(last.to)?;
    if passed.kind != PieceKind::Pawn || passed.team == pawn.team {
        return None;
    }

    // One rank beyond the passed pawn, on its file.
    last.to.offset(0, pawn.team.advance())
}

/// The square of the pawn removed by an en-passant capture landing on
/// `dest`: one rank behind the destination, from the capturer's view.
pub fn passed_pawn_square(dest: Square, capturer: Team) -> Square {
    dest.offset(0, -capturer.advance())
        .unwrap_or_else(|| panic!("en passant destination {dest} has no passed-pawn square"))
}

// =========================================================================
// Tests
// =========================================================================
