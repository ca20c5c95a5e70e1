//! Legal destination generation.
//!
//! Pipeline:
//!   1. Pseudo-legal destinations by movement pattern, with sliding rays
//!      trimmed at the first occupant (an enemy occupant is included as a
//!      capture, a friendly one excludes its square and everything beyond).
//!   2. Filtering: king destinations that would be attacked, pinned pieces
//!      held to their pin ray, and (while the king is in check) non-king
//!      moves that neither block nor capture the checker.
//!   3. Augmentation: castling destinations for the king, the en-passant
//!      destination for pawns.
//!
//! Destinations never include the mover's own square, and never include a
//! square occupied by a king: kings are not capturable.

use std::collections::BTreeSet;

use crate::engine::board::BoardState;
use crate::engine::history::MoveHistory;
use crate::engine::types::{Direction, PieceKind, Square, Team};
use crate::engine::{castling, check, en_passant};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Does a knight on `from` reach `to` in one jump?
#[inline]
pub(crate) fn knight_reaches(from: Square, to: Square) -> bool {
    let d = to - from;
    matches!((d.file.abs(), d.rank.abs()), (1, 2) | (2, 1))
}

// =========================================================================
// Pseudo-legal destinations
// =========================================================================

/// Destinations reachable by the piece on `from` by movement pattern and
/// occupancy alone: no check or pin filtering, no castling, no en passant.
pub fn pseudo_legal(board: &BoardState, from: Square) -> BTreeSet<Square> {
    let Some(piece) = board.piece_at(from) else {
        return BTreeSet::new();
    };

    let mut dests = match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece.team),
        PieceKind::Knight => leaper_destinations(board, from, piece.team, &KNIGHT_OFFSETS),
        PieceKind::King => {
            let steps: Vec<(i8, i8)> = Direction::ALL.iter().map(|d| d.step()).collect();
            leaper_destinations(board, from, piece.team, &steps)
        }
        PieceKind::Bishop => slider_destinations(board, from, piece.team, &Direction::DIAGONAL),
        PieceKind::Rook => slider_destinations(board, from, piece.team, &Direction::CARDINAL),
        PieceKind::Queen => slider_destinations(board, from, piece.team, &Direction::ALL),
    };

    dests.remove(&from);
    dests
}

/// Knight and king destinations: pattern squares that are empty or hold an
/// enemy piece other than a king. Knights ignore intervening pieces.
fn leaper_destinations(
    board: &BoardState,
    from: Square,
    team: Team,
    offsets: &[(i8, i8)],
) -> BTreeSet<Square> {
    let mut dests = BTreeSet::new();
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.piece_at(to) {
            None => {
                dests.insert(to);
            }
            Some(occupant) => {
                if occupant.team != team && occupant.kind != PieceKind::King {
                    dests.insert(to);
                }
            }
        }
    }
    dests
}

/// Sliding destinations: walk each ray, stopping at the first occupant.
fn slider_destinations(
    board: &BoardState,
    from: Square,
    team: Team,
    dirs: &[Direction],
) -> BTreeSet<Square> {
    let mut dests = BTreeSet::new();
    for &dir in dirs {
        for to in board.ray(from, dir) {
            match board.piece_at(to) {
                None => {
                    dests.insert(to);
                }
                Some(occupant) => {
                    if occupant.team != team && occupant.kind != PieceKind::King {
                        dests.insert(to);
                    }
                    break;
                }
            }
        }
    }
    dests
}

/// Pawn destinations: forward one to an empty square; forward two from the
/// team's starting rank when both squares are empty; diagonal-forward only
/// as a capture. En passant is layered on in `legal_destinations`.
fn pawn_destinations(board: &BoardState, from: Square, team: Team) -> BTreeSet<Square> {
    let mut dests = BTreeSet::new();
    let advance = team.advance();

    if let Some(one) = from.offset(0, advance)
        && board.piece_at(one).is_none()
    {
        dests.insert(one);
        if from.rank() == team.pawn_rank()
            && let Some(two) = from.offset(0, advance * 2)
            && board.piece_at(two).is_none()
        {
            dests.insert(two);
        }
    }

    for df in [-1, 1] {
        if let Some(to) = from.offset(df, advance)
            && let Some(occupant) = board.piece_at(to)
            && occupant.team != team
            && occupant.kind != PieceKind::King
        {
            dests.insert(to);
        }
    }

    dests
}

// =========================================================================
// Legal destinations
// =========================================================================

/// The full legal destination set for the piece on `from`.
///
/// Read-only: the board is never mutated. An empty square yields an empty
/// set.
pub fn legal_destinations(
    board: &BoardState,
    from: Square,
    history: &MoveHistory,
) -> BTreeSet<Square> {
    let Some(piece) = board.piece_at(from) else {
        return BTreeSet::new();
    };

    let mut dests = pseudo_legal(board, from);

    if piece.kind == PieceKind::King {
        dests.retain(|&to| !check::king_destination_unsafe(board, from, to));
        for to in castling::king_castle_destinations(board, from) {
            dests.insert(to);
        }
        return dests;
    }

    let ep_dest = if piece.kind == PieceKind::Pawn {
        en_passant::capturable_en_passant(board, from, history)
    } else {
        None
    };
    if let Some(to) = ep_dest {
        dests.insert(to);
    }

    dests.retain(|&to| !check::predict_exposes_king(board, from, to));

    if check::is_in_check(board, piece.team) {
        let resolutions = check::resolution_squares(board, piece.team);
        dests.retain(|&to| {
            resolutions.contains(&to)
                // Capturing en passant resolves the check when the passed
                // pawn is itself the checker.
                || (ep_dest == Some(to)
                    && resolutions.contains(&en_passant::passed_pawn_square(to, piece.team)))
        });
    }

    dests
}

// =========================================================================
// Tests
// =========================================================================
