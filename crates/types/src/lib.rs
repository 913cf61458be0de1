//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, session layer, JSON adapter).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: unbounded; row 0 is the floor and rows grow upward
//!
//! # Examples
//!
//! ```
//! use tetris_sim_types::{Cell, GameStatus, PieceKind, BOARD_WIDTH};
//!
//! // Parse from a character (case-insensitive)
//! let parsed = PieceKind::from_char('t').unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(parsed.as_str(), "T");
//!
//! // Cells order by column, then row
//! assert!(Cell::new(0, 5) < Cell::new(1, 0));
//!
//! assert_eq!(GameStatus::Completed.as_str(), "completed");
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// The seven piece kinds of the shape catalog
///
/// Each kind is identified by a single uppercase letter in move sequences:
/// - **Q**: 2x2 square
/// - **I**: horizontal bar, four cells wide
/// - **T**: T-shaped, stem pointing down
/// - **Z**: Z-shaped
/// - **S**: S-shaped (mirror of Z)
/// - **L**: L-shaped, foot pointing right
/// - **J**: J-shaped (mirror of L)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Q,
    I,
    T,
    Z,
    S,
    L,
    J,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Q,
        PieceKind::I,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Parse piece kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('q'), Some(PieceKind::Q));
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(PieceKind::Q),
            'I' => Some(PieceKind::I),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to uppercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::Q.as_str(), "Q");
    /// assert_eq!(PieceKind::J.as_str(), "J");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Q => "Q",
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An occupied board coordinate
///
/// `x` is the column (0 = leftmost), `y` is the row (0 = floor, growing upward).
/// The derived ordering compares `x` first, so sorting a list of cells
/// yields column-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Lifecycle of a simulation
///
/// - **Playing**: placements remain in the sequence
/// - **Completed**: every placement has been applied (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Completed,
}

impl GameStatus {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
