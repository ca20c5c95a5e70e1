//! Notation rendering for move-log entries.
//!
//! A token is the team+kind Unicode icon, optional disambiguation, `x` on
//! capture, and the lowercase destination square: `♘xf3`, `♖1a4`, `♙exd5`.
//! Castling renders as a fixed token: `0-0` kingside, `0-0-0` queenside.

use std::fmt;

use crate::engine::board::BoardState;
use crate::engine::history::{MoveHistory, MoveLogEntry};
use crate::engine::movegen;
use crate::engine::types::{PieceKind, Square, Team};

/// Unicode icon for a team's piece kind.
pub fn piece_icon(team: Team, kind: PieceKind) -> char {
    match team {
        Team::White => match kind {
            PieceKind::King => '\u{2654}',
            PieceKind::Queen => '\u{2655}',
            PieceKind::Rook => '\u{2656}',
            PieceKind::Bishop => '\u{2657}',
            PieceKind::Knight => '\u{2658}',
            PieceKind::Pawn => '\u{2659}',
        },
        Team::Black => match kind {
            PieceKind::King => '\u{265A}',
            PieceKind::Queen => '\u{265B}',
            PieceKind::Rook => '\u{265C}',
            PieceKind::Bishop => '\u{265D}',
            PieceKind::Knight => '\u{265E}',
            PieceKind::Pawn => '\u{265F}',
        },
    }
}

/// Ambiguity flags for the move `from -> dest`, computed on the pre-move
/// board: does another piece of the same team and kind, whose legal
/// destinations also contain `dest`, share the mover's file / rank?
pub fn ambiguity_flags(
    board: &BoardState,
    history: &MoveHistory,
    from: Square,
    dest: Square,
) -> (bool, bool) {
    let Some(piece) = board.piece_at(from) else {
        return (false, false);
    };

    let mut file_ambiguous = false;
    let mut rank_ambiguous = false;
    for (sq, _) in board.squares_of_kind(piece.team, piece.kind) {
        if sq == from {
            continue;
        }
        if movegen::legal_destinations(board, sq, history).contains(&dest) {
            file_ambiguous |= sq.file() == from.file();
            rank_ambiguous |= sq.rank() == from.rank();
        }
    }
    (file_ambiguous, rank_ambiguous)
}

fn file_letter(sq: Square) -> char {
    (b'a' + sq.file()) as char
}

fn rank_digit(sq: Square) -> char {
    (b'1' + sq.rank()) as char
}

impl fmt::Display for MoveLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = piece_icon(self.team, self.piece);

        if self.castle {
            let token = if self.from.file() > self.to.file() {
                "0-0-0"
            } else {
                "0-0"
            };
            return write!(f, "{icon}{token}");
        }

        write!(f, "{icon}")?;

        // Pawn captures always name their source file; otherwise the
        // disambiguation depends on which coordinates collide.
        if self.piece == PieceKind::Pawn && self.capture {
            write!(f, "{}", file_letter(self.from))?;
        } else if self.file_ambiguous && self.rank_ambiguous {
            write!(f, "{}", self.from.to_algebraic())?;
        } else if self.file_ambiguous {
            write!(f, "{}", rank_digit(self.from))?;
        } else if self.rank_ambiguous {
            write!(f, "{}", file_letter(self.from))?;
        }

        if self.capture {
            write!(f, "x")?;
        }

        write!(f, "{}", self.to.to_algebraic())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn entry(from: &str, to: &str, piece: PieceKind, team: Team) -> MoveLogEntry {
        MoveLogEntry::new(sq(from), sq(to), piece, team)
    }

    fn kings_at(white: &str, black: &str) -> BoardState {
        let mut board = BoardState::empty();
        board.place(sq(white), Team::White, PieceKind::King);
        board.place(sq(black), Team::Black, PieceKind::King);
        board
    }

    // -------------------------------------------------------------------
    // Plain tokens
    // -------------------------------------------------------------------

    #[test]
    fn pawn_push_token() {
        let e = entry("e2", "e4", PieceKind::Pawn, Team::White);
        assert_eq!(e.to_string(), "\u{2659}e4");
    }

    #[test]
    fn knight_move_token() {
        let e = entry("g1", "f3", PieceKind::Knight, Team::White);
        assert_eq!(e.to_string(), "\u{2658}f3");
    }

    #[test]
    fn capture_token() {
        let mut e = entry("c3", "e5", PieceKind::Bishop, Team::Black);
        e.capture = true;
        assert_eq!(e.to_string(), "\u{265D}xe5");
    }

    #[test]
    fn pawn_capture_names_source_file() {
        let mut e = entry("e4", "d5", PieceKind::Pawn, Team::White);
        e.capture = true;
        assert_eq!(e.to_string(), "\u{2659}exd5");
    }

    // -------------------------------------------------------------------
    // Castling tokens
    // -------------------------------------------------------------------

    #[test]
    fn castle_tokens() {
        let mut e = entry("e1", "g1", PieceKind::King, Team::White);
        e.castle = true;
        assert_eq!(e.to_string(), "\u{2654}0-0");

        let mut e = entry("e8", "c8", PieceKind::King, Team::Black);
        e.castle = true;
        assert_eq!(e.to_string(), "\u{265A}0-0-0");
    }

    // -------------------------------------------------------------------
    // Disambiguation rendering
    // -------------------------------------------------------------------

    #[test]
    fn shared_file_appends_source_rank() {
        let mut e = entry("a1", "a4", PieceKind::Rook, Team::White);
        e.file_ambiguous = true;
        assert_eq!(e.to_string(), "\u{2656}1a4");
    }

    #[test]
    fn shared_rank_appends_source_file() {
        let mut e = entry("a1", "e1", PieceKind::Rook, Team::White);
        e.rank_ambiguous = true;
        assert_eq!(e.to_string(), "\u{2656}ae1");
    }

    #[test]
    fn both_collisions_append_full_square() {
        let mut e = entry("a1", "c3", PieceKind::Queen, Team::White);
        e.file_ambiguous = true;
        e.rank_ambiguous = true;
        assert_eq!(e.to_string(), "\u{2655}a1c3");
    }

    #[test]
    fn unshared_ambiguity_renders_nothing() {
        // Flags false: pieces that collide on neither coordinate add no
        // disambiguation characters.
        let e = entry("b1", "d2", PieceKind::Knight, Team::White);
        assert_eq!(e.to_string(), "\u{2658}d2");
    }

    // -------------------------------------------------------------------
    // Flag computation
    // -------------------------------------------------------------------

    #[test]
    fn flags_for_rooks_sharing_a_file() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("a1"), Team::White, PieceKind::Rook);
        board.place(sq("a5"), Team::White, PieceKind::Rook);
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("a1"), sq("a3"));
        assert!(file_amb);
        assert!(!rank_amb);
    }

    #[test]
    fn flags_for_rooks_sharing_a_rank() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("a1"), Team::White, PieceKind::Rook);
        board.place(sq("e1"), Team::White, PieceKind::Rook);
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("a1"), sq("c1"));
        assert!(!file_amb);
        assert!(rank_amb);
    }

    #[test]
    fn flags_for_knights_sharing_neither() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("b1"), Team::White, PieceKind::Knight);
        board.place(sq("f3"), Team::White, PieceKind::Knight);
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("b1"), sq("d2"));
        assert!(!file_amb);
        assert!(!rank_amb);
    }

    #[test]
    fn flags_for_both_collisions() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("a1"), Team::White, PieceKind::Queen);
        board.place(sq("a3"), Team::White, PieceKind::Queen);
        board.place(sq("c1"), Team::White, PieceKind::Queen);
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("a1"), sq("c3"));
        assert!(file_amb);
        assert!(rank_amb);
    }

    #[test]
    fn no_flags_when_other_piece_cannot_reach() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("a1"), Team::White, PieceKind::Rook);
        board.place(sq("a5"), Team::White, PieceKind::Rook);
        // a5 cannot reach a1's destination h1 through a1 itself.
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("a1"), sq("h1"));
        assert!(!file_amb);
        assert!(!rank_amb);
    }

    #[test]
    fn enemy_pieces_never_create_ambiguity() {
        let mut board = kings_at("h8", "h6");
        board.place(sq("a1"), Team::White, PieceKind::Rook);
        board.place(sq("a5"), Team::Black, PieceKind::Rook);
        let (file_amb, rank_amb) =
            ambiguity_flags(&board, &MoveHistory::new(), sq("a1"), sq("a3"));
        assert!(!file_amb);
        assert!(!rank_amb);
    }

    #[test]
    fn icons_differ_by_team() {
        assert_ne!(
            piece_icon(Team::White, PieceKind::Queen),
            piece_icon(Team::Black, PieceKind::Queen)
        );
    }
}
