use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    White,
    Black,
}

impl Team {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank direction this team's pawns advance in: +1 for White, -1 for Black.
    #[inline]
    pub const fn advance(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    /// The rank pawns of this team start on (and may double-step from).
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Team::White => 1,
            Team::Black => 6,
        }
    }

    /// The back rank where this team's pieces begin.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Team::White => 0,
            Team::Black => 7,
        }
    }
}

impl std::ops::Not for Team {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the chess board (0..63, LERF: a1=0, h8=63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square(pub u8);

impl Square {
    pub const NUM: usize = 64;

    #[inline]
    pub fn new(index: u8) -> Self {
        debug_assert!(index < 64, "Square index out of range: {index}");
        Square(index)
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub fn from_file_rank(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    /// The square at (file + df, rank + dr), or `None` when off the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::from_file_rank(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Iterate every square on the board, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square::from_file_rank(file, rank))
        } else {
            None
        }
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl std::ops::Sub for Square {
    type Output = Delta;
    fn sub(self, rhs: Square) -> Delta {
        Delta {
            file: self.file() as i8 - rhs.file() as i8,
            rank: self.rank() as i8 - rhs.rank() as i8,
        }
    }
}

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// The difference between two squares.
///
/// `magnitude` orders points along a shared ray by distance from the ray's
/// origin; it is only meaningful for comparing deltas that lie on the same
/// ray (pin geometry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    #[inline]
    pub fn magnitude(self) -> i8 {
        self.file.abs() + self.rank.abs()
    }

    /// The ray direction this delta lies on exactly, if any: same file,
    /// same rank, or a true diagonal.
    pub fn direction(self) -> Option<Direction> {
        let Delta { file, rank } = self;
        if file == 0 && rank == 0 {
            return None;
        }
        if file == 0 {
            return Some(if rank > 0 {
                Direction::North
            } else {
                Direction::South
            });
        }
        if rank == 0 {
            return Some(if file > 0 {
                Direction::East
            } else {
                Direction::West
            });
        }
        if file.abs() == rank.abs() {
            return Some(match (file > 0, rank > 0) {
                (true, true) => Direction::NorthEast,
                (true, false) => Direction::SouthEast,
                (false, true) => Direction::NorthWest,
                (false, false) => Direction::SouthWest,
            });
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The 8 ray directions. North is the direction White pawns advance in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// (file, rank) step for one square along this direction.
    #[inline]
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    #[inline]
    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board.
///
/// `ordinal` distinguishes same-kind, same-team pieces ("pawn #3"); it is
/// identity only and carries no rule meaning. `has_moved` gates castling and
/// the pawn double-step, and is never cleared except by a full board reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub has_moved: bool,
    pub ordinal: u8,
}

impl Piece {
    pub fn new(team: Team, kind: PieceKind) -> Self {
        Piece {
            kind,
            team,
            has_moved: false,
            ordinal: 1,
        }
    }

    pub fn with_ordinal(team: Team, kind: PieceKind, ordinal: u8) -> Self {
        Piece {
            kind,
            team,
            has_moved: false,
            ordinal,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.kind)?;
        if self.ordinal > 1 {
            write!(f, " #{}", self.ordinal)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Status of the game after a completed move, from the perspective of the
/// side about to move next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has legal moves.
    Check,
    /// The side to move is checkmated; the winner is carried.
    Checkmate(Team),
    /// The side to move has no legal moves and is not in check.
    Stalemate,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate(winner) => write!(f, "checkmate ({winner} wins)"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Recoverable rule failures. Invariant violations (missing king, impossible
/// coordinates) are programming errors and panic instead.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("rejected move {from} -> {to}: {reason}")]
    Rejected {
        from: Square,
        to: Square,
        reason: String,
    },

    #[error("game is already over: {0}")]
    GameOver(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
