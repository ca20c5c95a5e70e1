//! Mailbox board representation.
//!
//! `BoardState` owns an 8×8 grid of `Option<Piece>` plus the side to move.
//! Unique occupancy is structural: a square holds at most one piece by
//! construction. Attack and blocking geometry is answered by walking rays
//! over the coordinate grid.

use crate::engine::types::{Direction, Piece, PieceKind, Square, Team};

/// A complete board position: piece placement and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    squares: [Option<Piece>; Square::NUM],
    side_to_move: Team,
}

impl BoardState {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// An empty board, White to move.
    pub fn empty() -> Self {
        BoardState {
            squares: [None; Square::NUM],
            side_to_move: Team::White,
        }
    }

    /// The standard starting position: all 32 pieces on their canonical
    /// squares, `has_moved` false everywhere, White to move.
    pub fn starting() -> Self {
        let mut board = BoardState::empty();
        for team in [Team::White, Team::Black] {
            let home = team.home_rank();
            let pawns = team.pawn_rank();

            // Back rank, ordinals counted from the a-file.
            let back = [
                (0, PieceKind::Rook, 1),
                (1, PieceKind::Knight, 1),
                (2, PieceKind::Bishop, 1),
                (3, PieceKind::Queen, 1),
                (4, PieceKind::King, 1),
                (5, PieceKind::Bishop, 2),
                (6, PieceKind::Knight, 2),
                (7, PieceKind::Rook, 2),
            ];
            for (file, kind, ordinal) in back {
                board.place_piece(
                    Square::from_file_rank(file, home),
                    Piece::with_ordinal(team, kind, ordinal),
                );
            }

            for file in 0..8 {
                board.place_piece(
                    Square::from_file_rank(file, pawns),
                    Piece::with_ordinal(team, PieceKind::Pawn, file + 1),
                );
            }
        }
        board
    }

    /// Restore the standard starting position, dropping all placement,
    /// `has_moved`, and turn state.
    pub fn reset(&mut self) {
        *self = BoardState::starting();
    }

    // -----------------------------------------------------------------------
    // Placement primitives
    // -----------------------------------------------------------------------

    /// Put a piece on a square, replacing any occupant.
    pub fn place_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.0 as usize] = Some(piece);
    }

    /// Convenience: place a fresh (unmoved, ordinal 1) piece.
    pub fn place(&mut self, sq: Square, team: Team, kind: PieceKind) {
        self.place_piece(sq, Piece::new(team, kind));
    }

    /// Remove and return the occupant of a square.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.0 as usize].take()
    }

    /// Relocate the piece on `from` to `to`, marking it moved. Returns the
    /// captured occupant of `to`, if any.
    ///
    /// Panics if `from` is empty: callers validate legality first, so an
    /// empty source is an internal inconsistency.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self
            .remove(from)
            .unwrap_or_else(|| panic!("no piece on {from} to move"));
        piece.has_moved = true;
        let captured = self.remove(to);
        self.place_piece(to, piece);
        captured
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square?
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.0 as usize]
    }

    /// All occupied squares with their pieces.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Squares occupied by a given team.
    pub fn squares_of(&self, team: Team) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.team == team)
    }

    /// Squares occupied by a given team and kind.
    pub fn squares_of_kind(
        &self,
        team: Team,
        kind: PieceKind,
    ) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares_of(team)
            .filter(move |(_, p)| p.kind == kind)
    }

    /// The square of a team's king.
    ///
    /// Panics if the king is absent: exactly one king per team is an
    /// invariant of legal play, and its violation is unrecoverable.
    pub fn king_square(&self, team: Team) -> Square {
        self.squares_of_kind(team, PieceKind::King)
            .map(|(sq, _)| sq)
            .next()
            .unwrap_or_else(|| panic!("no {team} king on the board"))
    }

    /// Whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Team {
        self.side_to_move
    }

    /// Hand the turn to the other team. Called exactly once per completed,
    /// fully-resolved move (the rook half of castling does not call it).
    pub fn end_turn(&mut self) {
        self.side_to_move = !self.side_to_move;
    }

    // -----------------------------------------------------------------------
    // Ray walking
    // -----------------------------------------------------------------------

    /// Squares along `dir` from `from` (exclusive), up to the board edge.
    pub fn ray(&self, from: Square, dir: Direction) -> RayIter {
        RayIter {
            current: Some(from),
            dir,
        }
    }

    /// The first occupied square along `dir` from `from`, skipping
    /// `excluded` if given (the simulated removal used by pin prediction).
    pub fn first_occupant_along(
        &self,
        from: Square,
        dir: Direction,
        excluded: Option<Square>,
    ) -> Option<(Square, Piece)> {
        for sq in self.ray(from, dir) {
            if excluded == Some(sq) {
                continue;
            }
            if let Some(piece) = self.piece_at(sq) {
                return Some((sq, piece));
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Render the board as an 8-line string (rank 8 at top), for debugging.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (0..8).rev() {
            s.push((b'1' + rank) as char);
            s.push(' ');
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                let ch = match self.piece_at(sq) {
                    Some(p) => piece_char(p),
                    None => '.',
                };
                s.push(ch);
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

/// Single letter for a piece: uppercase White, lowercase Black.
fn piece_char(piece: Piece) -> char {
    let c = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.team {
        Team::White => c.to_ascii_uppercase(),
        Team::Black => c,
    }
}

impl std::fmt::Display for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::starting()
    }
}

/// Iterator over the squares of a ray, origin exclusive.
pub struct RayIter {
    current: Option<Square>,
    dir: Direction,
}

impl Iterator for RayIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let (df, dr) = self.dir.step();
        let next = self.current?.offset(df, dr);
        self.current = next;
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    // ===================================================================
    // Starting position
    // ===================================================================

    #[test]
    fn starting_position_piece_count() {
        let board = BoardState::starting();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.squares_of(Team::White).count(), 16);
        assert_eq!(board.squares_of(Team::Black).count(), 16);
    }

    #[test]
    fn starting_position_side_to_move() {
        assert_eq!(BoardState::starting().side_to_move(), Team::White);
    }

    #[test]
    fn starting_white_back_rank() {
        let board = BoardState::starting();
        let kinds = [
            ("a1", PieceKind::Rook),
            ("b1", PieceKind::Knight),
            ("c1", PieceKind::Bishop),
            ("d1", PieceKind::Queen),
            ("e1", PieceKind::King),
            ("f1", PieceKind::Bishop),
            ("g1", PieceKind::Knight),
            ("h1", PieceKind::Rook),
        ];
        for (name, kind) in kinds {
            let p = board.piece_at(sq(name)).unwrap();
            assert_eq!(p.kind, kind, "wrong piece on {name}");
            assert_eq!(p.team, Team::White);
            assert!(!p.has_moved);
        }
    }

    #[test]
    fn starting_pawn_ranks() {
        let board = BoardState::starting();
        for file in b'a'..=b'h' {
            let white = format!("{}2", file as char);
            let black = format!("{}7", file as char);
            assert_eq!(board.piece_at(sq(&white)).unwrap().kind, PieceKind::Pawn);
            assert_eq!(board.piece_at(sq(&black)).unwrap().kind, PieceKind::Pawn);
        }
    }

    #[test]
    fn starting_middle_is_empty() {
        let board = BoardState::starting();
        for rank in 3..=6 {
            for file in b'a'..=b'h' {
                let name = format!("{}{}", file as char, rank);
                assert_eq!(board.piece_at(sq(&name)), None, "expected empty {name}");
            }
        }
    }

    #[test]
    fn starting_ordinals_distinguish_twins() {
        let board = BoardState::starting();
        assert_eq!(board.piece_at(sq("a1")).unwrap().ordinal, 1);
        assert_eq!(board.piece_at(sq("h1")).unwrap().ordinal, 2);
        assert_eq!(board.piece_at(sq("c8")).unwrap().ordinal, 1);
        assert_eq!(board.piece_at(sq("f8")).unwrap().ordinal, 2);
        assert_eq!(board.piece_at(sq("e2")).unwrap().ordinal, 5);
    }

    // ===================================================================
    // king_square
    // ===================================================================

    #[test]
    fn king_square_starting() {
        let board = BoardState::starting();
        assert_eq!(board.king_square(Team::White), sq("e1"));
        assert_eq!(board.king_square(Team::Black), sq("e8"));
    }

    #[test]
    #[should_panic(expected = "no white king")]
    fn king_square_missing_is_fatal() {
        let board = BoardState::empty();
        board.king_square(Team::White);
    }

    // ===================================================================
    // move_piece
    // ===================================================================

    #[test]
    fn move_piece_sets_has_moved() {
        let mut board = BoardState::starting();
        assert!(!board.piece_at(sq("e2")).unwrap().has_moved);
        let captured = board.move_piece(sq("e2"), sq("e4"));
        assert_eq!(captured, None);
        assert_eq!(board.piece_at(sq("e2")), None);
        let pawn = board.piece_at(sq("e4")).unwrap();
        assert!(pawn.has_moved);
        assert_eq!(pawn.ordinal, 5);
    }

    #[test]
    fn move_piece_returns_capture() {
        let mut board = BoardState::empty();
        board.place(sq("d4"), Team::White, PieceKind::Rook);
        board.place(sq("d7"), Team::Black, PieceKind::Pawn);
        let captured = board.move_piece(sq("d4"), sq("d7")).unwrap();
        assert_eq!(captured.kind, PieceKind::Pawn);
        assert_eq!(captured.team, Team::Black);
        assert_eq!(board.piece_at(sq("d7")).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn has_moved_survives_a_return_trip() {
        let mut board = BoardState::starting();
        board.move_piece(sq("h1"), sq("h5"));
        board.move_piece(sq("h5"), sq("h1"));
        assert!(board.piece_at(sq("h1")).unwrap().has_moved);
    }

    #[test]
    #[should_panic(expected = "no piece on e4")]
    fn move_piece_from_empty_is_fatal() {
        let mut board = BoardState::starting();
        board.move_piece(sq("e4"), sq("e5"));
    }

    // ===================================================================
    // Turn handling
    // ===================================================================

    #[test]
    fn end_turn_alternates() {
        let mut board = BoardState::starting();
        board.end_turn();
        assert_eq!(board.side_to_move(), Team::Black);
        board.end_turn();
        assert_eq!(board.side_to_move(), Team::White);
    }

    // ===================================================================
    // Reset
    // ===================================================================

    #[test]
    fn reset_restores_everything() {
        let mut board = BoardState::starting();
        board.move_piece(sq("e2"), sq("e4"));
        board.end_turn();
        board.reset();
        assert_eq!(board, BoardState::starting());
        assert!(board.occupied().all(|(_, p)| !p.has_moved));
        assert_eq!(board.side_to_move(), Team::White);
    }

    // ===================================================================
    // Ray walking
    // ===================================================================

    #[test]
    fn ray_stops_at_board_edge() {
        let board = BoardState::empty();
        let squares: Vec<Square> = board.ray(sq("f3"), Direction::NorthEast).collect();
        assert_eq!(squares, vec![sq("g4"), sq("h5")]);
    }

    #[test]
    fn first_occupant_along_finds_blocker() {
        let mut board = BoardState::empty();
        board.place(sq("e4"), Team::White, PieceKind::Rook);
        board.place(sq("e7"), Team::Black, PieceKind::Pawn);
        let (found, piece) = board
            .first_occupant_along(sq("e4"), Direction::North, None)
            .unwrap();
        assert_eq!(found, sq("e7"));
        assert_eq!(piece.kind, PieceKind::Pawn);
        assert_eq!(
            board.first_occupant_along(sq("e4"), Direction::South, None),
            None
        );
    }

    #[test]
    fn first_occupant_along_respects_exclusion() {
        let mut board = BoardState::empty();
        board.place(sq("e2"), Team::White, PieceKind::Bishop);
        board.place(sq("e8"), Team::Black, PieceKind::Rook);
        // With e2 excluded the walk sees straight through to e8.
        let (found, _) = board
            .first_occupant_along(sq("e1"), Direction::North, Some(sq("e2")))
            .unwrap();
        assert_eq!(found, sq("e8"));
    }

    // ===================================================================
    // Display
    // ===================================================================

    #[test]
    fn board_string_starting() {
        let board = BoardState::starting();
        let s = board.board_string();
        assert!(s.starts_with("8 r n b q k b n r"));
        assert!(s.ends_with("a b c d e f g h"));
    }
}
