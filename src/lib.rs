//! Tetris sequence simulator (workspace facade crate).
//!
//! This package exposes the `tetris_sim::{core,adapter,types}` public API while
//! the implementation lives in dedicated crates under `crates/`.

pub use tetris_sim_adapter as adapter;
pub use tetris_sim_core as core;
pub use tetris_sim_types as types;
