//! Session store - maps game ids to live games
//!
//! Each game sits behind its own mutex so at most one request mutates a given
//! game at a time, while requests for different games run independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::core::{Game, GameSnapshot, PlaceError};

/// Default upper bound on the length of a submitted sequence, in bytes
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 4096;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game not found: {0}")]
    NotFound(String),
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),
    #[error("move failed: {0}")]
    MoveFailed(#[from] PlaceError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Live games keyed by id (`game_0`, `game_1`, ...)
pub struct SessionStore {
    games: RwLock<HashMap<String, Arc<Mutex<Game>>>>,
    next_id: AtomicU64,
    max_sequence_len: usize,
}

impl SessionStore {
    pub fn new(max_sequence_len: usize) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            max_sequence_len,
        }
    }

    pub fn max_sequence_len(&self) -> usize {
        self.max_sequence_len
    }

    /// Create a game from a sequence and return its id with the initial state
    pub async fn start(&self, sequence: &str) -> Result<(String, GameSnapshot), SessionError> {
        if sequence.len() > self.max_sequence_len {
            return Err(SessionError::InvalidSequence(format!(
                "sequence is {} bytes, limit is {}",
                sequence.len(),
                self.max_sequence_len
            )));
        }

        let game = Game::new(sequence);
        let snapshot = game.snapshot();
        let id = format!("game_{}", self.next_id.fetch_add(1, Ordering::Relaxed));

        self.games
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(game)));
        info!(game_id = %id, placements = snapshot.total_steps, "game started");

        Ok((id, snapshot))
    }

    /// Apply the next placement of a game
    pub async fn next(&self, id: &str) -> Result<GameSnapshot, SessionError> {
        let game = self.lookup(id).await?;
        let mut game = game.lock().await;
        Ok(game.advance()?)
    }

    /// Current state of a game
    pub async fn get(&self, id: &str) -> Result<GameSnapshot, SessionError> {
        let game = self.lookup(id).await?;
        let game = game.lock().await;
        Ok(game.snapshot())
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    async fn lookup(&self, id: &str) -> Result<Arc<Mutex<Game>>, SessionError> {
        self.games
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEQUENCE_LEN)
    }
}
