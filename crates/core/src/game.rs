//! Game module - steps a parsed sequence through the board
//!
//! A [`Game`] owns its board and move history exclusively. It moves strictly
//! forward: each successful [`Game::advance`] applies one placement, and a
//! failed one leaves the game exactly as it was.

use tracing::{debug, warn};

use crate::board::Board;
use crate::error::PlaceError;
use crate::sequence::{parse_sequence, Placement};
use crate::snapshot::{GameSnapshot, MoveRecord};
use crate::types::GameStatus;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Game {
    sequence: String,
    placements: Vec<Placement>,
    board: Board,
    current_step: usize,
    history: Vec<MoveRecord>,
}

impl Game {
    /// Create a game from a raw sequence string
    ///
    /// The sequence is parsed once; invalid tokens are dropped, so an empty or
    /// fully malformed sequence yields a game that is already completed.
    pub fn new(sequence: impl Into<String>) -> Self {
        let sequence = sequence.into();
        let placements = parse_sequence(&sequence);
        debug!(
            sequence = %sequence,
            placements = placements.len(),
            "game created"
        );

        Self {
            sequence,
            placements,
            board: Board::new(),
            current_step: 0,
            history: Vec::new(),
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.placements.len()
    }

    pub fn status(&self) -> GameStatus {
        if self.current_step >= self.placements.len() {
            GameStatus::Completed
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == GameStatus::Completed
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// The placement that the next advance will apply
    pub fn next_placement(&self) -> Option<Placement> {
        self.placements.get(self.current_step).copied()
    }

    /// Apply the next placement and return the record it produced
    ///
    /// Returns `Ok(None)` once the game is completed.
    pub fn step(&mut self) -> Result<Option<&MoveRecord>, PlaceError> {
        let Some(placement) = self.next_placement() else {
            return Ok(None);
        };

        // Board::apply is all-or-nothing, so a failure needs no rollback here.
        let rows_cleared = self
            .board
            .apply(placement.kind, placement.column as i32)
            .map_err(|e| {
                warn!(
                    step = self.current_step,
                    piece = %e.kind(),
                    error = %e,
                    code = e.code(),
                    "placement failed"
                );
                e
            })?;

        self.history.push(MoveRecord {
            kind: placement.kind,
            column: placement.column,
            height_after: self.board.height(),
            rows_cleared,
        });
        self.current_step += 1;

        Ok(self.history.last())
    }

    /// Advance one step and return the resulting snapshot
    ///
    /// A completed game returns its current snapshot unchanged.
    pub fn advance(&mut self) -> Result<GameSnapshot, PlaceError> {
        self.step()?;
        Ok(self.snapshot())
    }

    /// Advance until completed and return the final height
    pub fn run_to_end(&mut self) -> Result<u32, PlaceError> {
        while !self.is_completed() {
            self.step()?;
        }
        Ok(self.height())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            sequence: self.sequence.clone(),
            current_step: self.current_step,
            total_steps: self.placements.len(),
            grid: self.board.cells(),
            moves_history: self.history.clone(),
            current_height: self.board.height(),
            status: self.status(),
        }
    }
}

/// Evaluate a whole sequence and return the final stack height
///
/// # Examples
///
/// ```
/// use tetris_sim_core::final_height;
///
/// assert_eq!(final_height("Q0,Q2,Q4,Q6,Q8").unwrap(), 0);
/// assert_eq!(final_height("I0,I4").unwrap(), 1);
/// assert!(final_height("I8").is_err());
/// ```
pub fn final_height(sequence: &str) -> Result<u32, PlaceError> {
    Game::new(sequence).run_to_end()
}
