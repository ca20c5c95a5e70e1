//! Check detection and prediction.
//!
//! Attack detection walks the 8 ray directions from the square under test
//! and classifies the first occupant found; knight attacks come from a
//! separate offset scan, since they are not reachable by ray-walking.
//!
//! `predict_exposes_king` answers the pin question for a candidate move
//! without mutating the board: the mover is excluded from the ray walk,
//! simulating its removal.

use std::collections::BTreeSet;

use crate::engine::board::BoardState;
use crate::engine::movegen;
use crate::engine::types::{Delta, Direction, Piece, PieceKind, Square, Team};

// =========================================================================
// Attack detection
// =========================================================================

/// Is `target` attacked by any piece of `by`?
pub fn is_square_attacked(board: &BoardState, target: Square, by: Team) -> bool {
    for dir in Direction::ALL {
        if let Some((sq, piece)) = board.first_occupant_along(target, dir, None)
            && piece.team == by
            && covers_ray(piece, dir.is_cardinal(), target - sq)
        {
            return true;
        }
    }

    board
        .squares_of_kind(by, PieceKind::Knight)
        .any(|(sq, _)| movegen::knight_reaches(sq, target))
}

/// Is `team`'s king currently in check?
#[inline]
pub fn is_in_check(board: &BoardState, team: Team) -> bool {
    is_square_attacked(board, board.king_square(team), !team)
}

/// Could `piece` give check along a ray, given the delta from the target
/// square back to the piece's square (`delta = target - piece`)?
///
/// Cardinal rays permit rooks and queens; diagonal rays permit bishops,
/// queens, and a one-square pawn on the correct forward side. A king covers
/// any adjacent square (relevant when filtering the other king's moves).
fn covers_ray(piece: Piece, cardinal: bool, delta: Delta) -> bool {
    match piece.kind {
        PieceKind::King => delta.file.abs() <= 1 && delta.rank.abs() <= 1,
        PieceKind::Rook => cardinal,
        PieceKind::Bishop => !cardinal,
        PieceKind::Queen => true,
        PieceKind::Pawn => {
            !cardinal && delta.file.abs() == 1 && delta.rank == piece.team.advance()
        }
        PieceKind::Knight => false,
    }
}

// =========================================================================
// Pin / self-check prediction
// =========================================================================

/// Would moving the piece on `mover_sq` to `dest` expose its own king to
/// check along the ray the mover currently shields?
///
/// King moves are out of scope here; they are filtered per destination with
/// `king_destination_unsafe`.
pub fn predict_exposes_king(board: &BoardState, mover_sq: Square, dest: Square) -> bool {
    let Some(mover) = board.piece_at(mover_sq) else {
        return false;
    };
    if mover.kind == PieceKind::King {
        return false;
    }

    let king_sq = board.king_square(mover.team);
    let Some(dir) = (mover_sq - king_sq).direction() else {
        return false;
    };

    // Walk the ray with the mover lifted off the board.
    let Some((threat_sq, threat)) =
        board.first_occupant_along(king_sq, dir, Some(mover_sq))
    else {
        return false;
    };
    if threat.team == mover.team {
        return false;
    }

    // A piece closer to the king than the mover shields it regardless.
    let threat_dist = (threat_sq - king_sq).magnitude();
    if threat_dist < (mover_sq - king_sq).magnitude() {
        return false;
    }

    if !covers_ray(threat, dir.is_cardinal(), king_sq - threat_sq) {
        return false;
    }

    // The mover is pinned. The destination stays legal only if it remains on
    // the pin ray, between the king (exclusive) and the threat (inclusive;
    // capturing the pinning piece also keeps the king covered).
    let stays_on_ray = (dest - king_sq).direction() == Some(dir)
        && (dest - king_sq).magnitude() <= threat_dist;
    !stays_on_ray
}

/// Would the king on `king_sq` be attacked after moving to `dest`?
///
/// Simulated on a scratch board so that a king stepping backwards along a
/// checking ray is still seen by the slider, and capturing a defended piece
/// is still refused.
pub fn king_destination_unsafe(board: &BoardState, king_sq: Square, dest: Square) -> bool {
    let mut scratch = board.clone();
    scratch.remove(dest);
    let king = scratch
        .remove(king_sq)
        .unwrap_or_else(|| panic!("no king on {king_sq}"));
    let enemy = !king.team;
    scratch.place_piece(dest, king);
    is_square_attacked(&scratch, dest, enemy)
}

// =========================================================================
// Check resolution (for non-king movers while the king is in check)
// =========================================================================

/// A piece currently giving check: its square, and the ray direction from
/// the king towards it (`None` for knights).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checker {
    pub square: Square,
    pub ray: Option<Direction>,
}

/// All pieces currently checking `team`'s king.
pub fn checkers(board: &BoardState, team: Team) -> Vec<Checker> {
    let king_sq = board.king_square(team);
    let mut found = Vec::new();

    for dir in Direction::ALL {
        if let Some((sq, piece)) = board.first_occupant_along(king_sq, dir, None)
            && piece.team != team
            && covers_ray(piece, dir.is_cardinal(), king_sq - sq)
        {
            found.push(Checker {
                square: sq,
                ray: Some(dir),
            });
        }
    }

    for (sq, _) in board.squares_of_kind(!team, PieceKind::Knight) {
        if movegen::knight_reaches(sq, king_sq) {
            found.push(Checker {
                square: sq,
                ray: None,
            });
        }
    }

    found
}

/// Destination squares that resolve the current check for a non-king mover:
/// capturing a checker, or interposing strictly between the king and a
/// sliding checker. With more than one checker the destination must resolve
/// every check, so the per-checker sets are intersected.
pub fn resolution_squares(board: &BoardState, team: Team) -> BTreeSet<Square> {
    let king_sq = board.king_square(team);
    let mut result: Option<BTreeSet<Square>> = None;

    for checker in checkers(board, team) {
        let mut resolves = BTreeSet::new();
        resolves.insert(checker.square);
        if let Some(dir) = checker.ray {
            for sq in board.ray(king_sq, dir) {
                if sq == checker.square {
                    break;
                }
                resolves.insert(sq);
            }
        }
        result = Some(match result {
            None => resolves,
            Some(prev) => prev.intersection(&resolves).copied().collect(),
        });
    }

    result.unwrap_or_default()
}

// =========================================================================
// Tests
// =========================================================================
