//! Move log: append-only entries plus a replay cursor.

use serde::{Deserialize, Serialize};

use crate::engine::types::{PieceKind, Square, Team};

// =========================================================================
// MoveLogEntry
// =========================================================================

/// One completed move, as recorded in the history.
///
/// Entries are immutable once logged, with one exception: when the rook half
/// of castling completes, the king's entry (the preceding one) gets its
/// `castle` flag set instead of the rook move being logged independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub team: Team,
    /// A piece was captured (including en passant).
    pub capture: bool,
    /// Another piece of the same kind and team could reach `to` from the
    /// same file.
    pub file_ambiguous: bool,
    /// Another piece of the same kind and team could reach `to` from the
    /// same rank.
    pub rank_ambiguous: bool,
    /// This entry is a completed castle (king's two-square move).
    pub castle: bool,
    /// The piece had never moved before this entry; for a two-rank pawn
    /// advance this marks en-passant eligibility for the next ply.
    pub first_move: bool,
}

impl MoveLogEntry {
    pub fn new(from: Square, to: Square, piece: PieceKind, team: Team) -> Self {
        MoveLogEntry {
            from,
            to,
            piece,
            team,
            capture: false,
            file_ambiguous: false,
            rank_ambiguous: false,
            castle: false,
            first_move: false,
        }
    }
}

// =========================================================================
// MoveHistory
// =========================================================================

/// Append-only move log with a navigation cursor.
///
/// Insertion order is chronological. The cursor stays clamped to
/// `[0, len-1]`; stepping past either end is a no-op that returns `None`.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    entries: Vec<MoveLogEntry>,
    cursor: usize,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    /// Append an entry and move the cursor to it.
    pub fn add_entry(&mut self, entry: MoveLogEntry) {
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Drop all entries and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[MoveLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest entry.
    pub fn most_recent(&self) -> Option<&MoveLogEntry> {
        self.entries.last()
    }

    /// Convert the newest entry into a castle marker (the castle-completion
    /// pass, run when the paired rook move finishes).
    pub fn mark_most_recent_castled(&mut self) {
        if let Some(entry) = self.entries.last_mut() {
            entry.castle = true;
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&MoveLogEntry> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor one entry back and return the entry there.
    pub fn step_back(&mut self) -> Option<&MoveLogEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Move the cursor one entry forward and return the entry there.
    pub fn step_forward(&mut self) -> Option<&MoveLogEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }
}

// =========================================================================
// Tests
// =========================================================================
