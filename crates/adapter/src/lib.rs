//! Adapter module - remote access to simulations via TCP with a JSON protocol
//!
//! This crate wraps the pure simulation core with everything a remote client
//! needs: a session store that maps game ids to live games, the example
//! sequence catalog, and a line-delimited JSON server.
//!
//! # Protocol Overview
//!
//! Each request is one JSON object per line; the server answers every request
//! with exactly one line:
//!
//! 1. **start**: create a game from a sequence, reply `started` with its id and state
//! 2. **next**: apply the next placement of a game, reply `state`
//! 3. **get**: read a game's state without changing it, reply `state`
//! 4. **sequences**: list the example sequences with their expected heights
//!
//! Failures reply `error` with a `code` (`invalid_message`, `invalid_sequence`,
//! `not_found`, `move_failed`, `internal`) and keep the connection open.
//!
//! # Environment Variables
//!
//! - `TETRIS_SIM_HOST`: Bind address (default: "127.0.0.1")
//! - `TETRIS_SIM_PORT`: Port number (default: 8000)
//! - `TETRIS_SIM_SEQUENCES`: Example sequence file (default: "input.txt")
//! - `TETRIS_SIM_MAX_SEQUENCE_LEN`: Longest accepted sequence in bytes (default: 4096)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"start","seq":1,"sequence":"Q0,Q2,Q4,Q6,Q8"}
//! Server -> Client: {"type":"started","seq":1,"game_id":"game_0","state":{"current_step":0,...}}
//! Client -> Server: {"type":"next","seq":2,"game_id":"game_0"}
//! Server -> Client: {"type":"state","seq":2,"state":{"current_step":1,"current_height":2,...}}
//! Client -> Server: {"type":"next","seq":3,"game_id":"game_9"}
//! Server -> Client: {"type":"error","seq":3,"code":"not_found","message":"game not found: game_9"}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 8000
//! {"type":"sequences","seq":1}
//! ```

pub mod protocol;
pub mod sequences;
pub mod server;
pub mod session;

pub use tetris_sim_core as core;
pub use tetris_sim_types as types;

pub use protocol::*;
pub use sequences::{default_sequences, load_sequences, parse_sequence_list, SequenceInfo};
pub use server::{handle_line, run_server, ServerConfig, ServerState};
pub use session::{SessionError, SessionStore};
