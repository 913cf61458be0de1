use crate::types::{Cell, GameStatus, PieceKind};

/// One applied placement, recorded after its row clears
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub kind: PieceKind,
    pub column: u8,
    pub height_after: u32,
    /// Cleared row indices, ascending
    pub rows_cleared: Vec<u32>,
}

/// Fully materialized, read-only view of a game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub sequence: String,
    pub current_step: usize,
    pub total_steps: usize,
    /// Occupied cells sorted by column, then row
    pub grid: Vec<Cell>,
    pub moves_history: Vec<MoveRecord>,
    pub current_height: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves_history.last()
    }
}
