//! Castling eligibility and the paired rook move.
//!
//! Eligibility: the king has never moved, the first piece along the rank in
//! the chosen direction is that team's unmoved rook, and the king does not
//! castle out of, through, or into an attacked square. Executing a
//! two-square king move triggers the rook's relocation to the square the
//! king crossed, under the same logical turn.

use crate::engine::board::BoardState;
use crate::engine::check;
use crate::engine::types::{Direction, PieceKind, Square, Team};

/// Which sides the king may castle to. Queenside is towards the a-file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastleSides {
    pub queenside: bool,
    pub kingside: bool,
}

/// Castling eligibility for the king on `king_sq`.
///
/// Returns both-false when the square does not hold an unmoved king, or the
/// king is currently in check.
pub fn can_castle(board: &BoardState, king_sq: Square) -> CastleSides {
    let Some(piece) = board.piece_at(king_sq) else {
        return CastleSides::default();
    };
    if piece.kind != PieceKind::King || piece.has_moved {
        return CastleSides::default();
    }
    if check::is_in_check(board, piece.team) {
        return CastleSides::default();
    }

    CastleSides {
        queenside: side_eligible(board, king_sq, piece.team, Direction::West),
        kingside: side_eligible(board, king_sq, piece.team, Direction::East),
    }
}

fn side_eligible(board: &BoardState, king_sq: Square, team: Team, dir: Direction) -> bool {
    // The ray must reach the rook with no intervening occupant; an unmoved
    // rook can only be on its home corner, so finding it first is enough.
    let Some((_, rook)) = board.first_occupant_along(king_sq, dir, None) else {
        return false;
    };
    if rook.team != team || rook.kind != PieceKind::Rook || rook.has_moved {
        return false;
    }

    // Both squares the king passes over (including its destination) must be
    // safe from the opponent.
    let (df, _) = dir.step();
    for steps in 1..=2 {
        let Some(transit) = king_sq.offset(df * steps, 0) else {
            return false;
        };
        if check::is_square_attacked(board, transit, !team) {
            return false;
        }
    }

    true
}

/// Castling destinations (two files to either eligible side) for the king
/// on `king_sq`.
pub fn king_castle_destinations(board: &BoardState, king_sq: Square) -> Vec<Square> {
    let sides = can_castle(board, king_sq);
    let mut dests = Vec::new();
    if sides.queenside
        && let Some(to) = king_sq.offset(-2, 0)
    {
        dests.push(to);
    }
    if sides.kingside
        && let Some(to) = king_sq.offset(2, 0)
    {
        dests.push(to);
    }
    dests
}

/// For a two-square horizontal king move, the paired rook relocation:
/// (rook's current corner, the square adjacent to the king's destination on
/// the crossed side). `None` when the king move is not a castle.
pub fn rook_shift(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    let diff = king_to - king_from;
    if diff.rank != 0 || diff.file.abs() != 2 {
        return None;
    }
    let rank = king_from.rank();
    if diff.file < 0 {
        Some((Square::from_file_rank(0, rank), king_from.offset(-1, 0)?))
    } else {
        Some((Square::from_file_rank(7, rank), king_from.offset(1, 0)?))
    }
}

// =========================================================================
// Tests
// =========================================================================
