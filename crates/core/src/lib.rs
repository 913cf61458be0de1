//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the shape catalog, the sequence parser, the board
//! engine and the step-by-step game driver. It has **no dependencies** on
//! networking, storage or I/O, making it:
//!
//! - **Deterministic**: the same sequence always produces the same history
//! - **Independent**: every [`Game`] is a plain owned value; there is no global state
//! - **Testable**: every rule is covered by unit and integration tests
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven fixed piece footprints
//! - [`sequence`]: lenient parsing of `"Q0,I4,T2"` style move lists
//! - [`board`]: sparse row-bitmask grid with drop resolution and row clearing
//! - [`game`]: forward-only driver recording one [`MoveRecord`] per placement
//! - [`snapshot`]: read-only views handed to callers
//!
//! # Rules
//!
//! - The board is 10 columns wide and unbounded upward; row 0 is the floor
//! - A piece enters above the stack and falls straight down until the next
//!   row would hit the floor or an occupied cell
//! - Pieces never rotate or move sideways
//! - Every row that becomes full is cleared at once and the rows above
//!   compact downward
//!
//! # Example
//!
//! ```
//! use tetris_sim_core::Game;
//! use tetris_sim_core::types::GameStatus;
//!
//! let mut game = Game::new("Q0,Q2,Q4,Q6,Q8");
//! while !game.is_completed() {
//!     game.advance().unwrap();
//! }
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.status, GameStatus::Completed);
//! assert_eq!(snap.current_height, 0);
//! assert_eq!(snap.moves_history[4].rows_cleared, vec![0, 1]);
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod sequence;
pub mod shapes;
pub mod snapshot;

pub use tetris_sim_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::PlaceError;
pub use game::{final_height, Game};
pub use sequence::{parse_sequence, parse_token, Placement};
pub use shapes::{get_shape, piece_cells};
pub use snapshot::{GameSnapshot, MoveRecord};
