//! Board module - manages the occupancy grid
//!
//! The board is 10 columns wide and unbounded upward. Each row is stored as a
//! 10-bit mask in a vector indexed by row, which keeps full-row detection and
//! compaction to plain integer operations.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y starts at 0
//! on the floor and grows upward.
//!
//! Invariant: `rows.len()` is the board height, i.e. the topmost stored row is
//! never empty.

use tracing::debug;

use crate::error::PlaceError;
use crate::shapes::{get_shape, piece_cells, shape_span};
use crate::types::{Cell, PieceKind, BOARD_WIDTH};

/// Row mask with every column occupied
const FULL_ROW: u16 = (1 << BOARD_WIDTH) - 1;

/// The occupancy grid - one bitmask per row, bottom row first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    rows: Vec<u16>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a board from a set of occupied cells
    ///
    /// Cells outside the columns or below the floor are ignored; duplicates
    /// collapse into one. No rows are cleared.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut board = Self::new();
        for cell in cells {
            board.set(cell.x, cell.y, true);
        }
        board
    }

    #[inline(always)]
    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y >= 0
    }

    /// Current stack height: highest occupied row + 1, or 0 when empty
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.rows
            .get(y as usize)
            .map(|row| row & (1 << x) != 0)
            .unwrap_or(false)
    }

    /// Check if position is valid for a piece cell (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        Self::in_bounds(x, y) && !self.is_occupied(x, y)
    }

    /// Set or clear a cell
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        let y = y as usize;
        if occupied {
            if y >= self.rows.len() {
                self.rows.resize(y + 1, 0);
            }
            self.rows[y] |= 1 << x;
        } else if let Some(row) = self.rows.get_mut(y) {
            *row &= !(1 << x);
            self.trim();
        }
        true
    }

    /// Number of occupied cells in a row
    pub fn row_count(&self, y: i32) -> u32 {
        if y < 0 {
            return 0;
        }
        self.rows
            .get(y as usize)
            .map(|row| row.count_ones())
            .unwrap_or(0)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_count(y) == BOARD_WIDTH as u32
    }

    /// Total number of occupied cells
    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Height of a single column: its topmost occupied row + 1, or 0
    pub fn column_height(&self, x: i32) -> u32 {
        if x < 0 || x >= BOARD_WIDTH as i32 {
            return 0;
        }
        self.rows
            .iter()
            .rposition(|row| row & (1 << x) != 0)
            .map(|y| y as u32 + 1)
            .unwrap_or(0)
    }

    /// All occupied cells, sorted by column then row
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cell_count() as usize);
        for x in 0..BOARD_WIDTH as i32 {
            for (y, row) in self.rows.iter().enumerate() {
                if row & (1 << x) != 0 {
                    out.push(Cell::new(x, y as i32));
                }
            }
        }
        out
    }

    /// Check if a piece anchored at (column, row) lies in bounds on free cells
    pub fn fits(&self, kind: PieceKind, column: i32, row: i32) -> bool {
        piece_cells(kind, column, row)
            .iter()
            .all(|c| self.is_valid(c.x, c.y))
    }

    /// Reject a column whose footprint leaves the grid horizontally
    ///
    /// Depends only on the piece and column, never on the grid contents.
    pub fn check_bounds(kind: PieceKind, column: i32) -> Result<(), PlaceError> {
        let (min_dx, max_dx) = shape_span(kind);
        if column + min_dx as i32 >= 0 && column + (max_dx as i32) < BOARD_WIDTH as i32 {
            Ok(())
        } else {
            Err(PlaceError::OutOfBounds { kind, column })
        }
    }

    /// Row at which a piece dropped at `column` comes to rest
    ///
    /// The piece enters at the current height, where every row is free, and
    /// falls while the position one row lower is still legal.
    pub fn resolve_drop(&self, kind: PieceKind, column: i32) -> Result<i32, PlaceError> {
        Self::check_bounds(kind, column)?;

        let mut row = self.height() as i32;
        if !self.fits(kind, column, row) {
            return Err(PlaceError::NoLegalPlacement { kind, column });
        }
        while row > 0 && self.fits(kind, column, row - 1) {
            row -= 1;
        }
        Ok(row)
    }

    /// Lock a piece onto the board at given anchor position
    /// Returns true if successful, false if any cell is out of bounds or occupied
    pub fn lock_piece(&mut self, kind: PieceKind, column: i32, row: i32) -> bool {
        // First check if all positions are valid
        if !self.fits(kind, column, row) {
            return false;
        }

        // Then lock all cells
        for &(dx, dy) in get_shape(kind) {
            self.set(column + dx as i32, row + dy as i32, true);
        }

        true
    }

    /// Clear all full rows and return the row indices that were cleared (ascending)
    ///
    /// All full rows are removed at once; each surviving row moves down by the
    /// number of cleared rows beneath it.
    pub fn clear_full_rows(&mut self) -> Vec<u32> {
        let mut cleared_rows = Vec::new();
        let mut write_y = 0usize;

        // Scan from bottom to top
        for read_y in 0..self.rows.len() {
            let row = self.rows[read_y];
            if row == FULL_ROW {
                // This row is full, record it and skip
                cleared_rows.push(read_y as u32);
            } else {
                // This row survives, move it down to the write position
                self.rows[write_y] = row;
                write_y += 1;
            }
        }

        self.rows.truncate(write_y);
        self.trim();
        cleared_rows
    }

    /// Drop a piece at `column`, lock it and clear completed rows
    ///
    /// Returns the cleared row indices (ascending, possibly empty). The board
    /// is left untouched when the placement fails.
    pub fn apply(&mut self, kind: PieceKind, column: i32) -> Result<Vec<u32>, PlaceError> {
        let row = self.resolve_drop(kind, column)?;
        if !self.lock_piece(kind, column, row) {
            return Err(PlaceError::NoLegalPlacement { kind, column });
        }

        let cleared = self.clear_full_rows();
        debug!(
            piece = %kind,
            column,
            row,
            height = self.height(),
            cleared = ?cleared,
            "piece locked"
        );
        Ok(cleared)
    }

    /// Drop empty rows from the top so the length stays equal to the height
    fn trim(&mut self) {
        while self.rows.last() == Some(&0) {
            self.rows.pop();
        }
    }
}
