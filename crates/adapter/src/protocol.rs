//! Protocol module - JSON message types for the simulation adapter
//!
//! Line-delimited JSON. Every message has `type` and `seq`; responses echo the
//! `seq` of the request they answer.

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, MoveRecord};
use crate::session::SessionError;
use crate::sequences::SequenceInfo;
use crate::types::{Cell, GameStatus};

// ============== Client -> Server Messages ==============

/// Create a game from a sequence string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMessage {
    pub seq: u64,
    pub sequence: String,
}

/// Apply the next placement of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMessage {
    pub seq: u64,
    pub game_id: String,
}

/// Read the current state of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessage {
    pub seq: u64,
    pub game_id: String,
}

/// List the example sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencesRequest {
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParsedMessage {
    #[serde(rename = "start")]
    Start(StartMessage),
    #[serde(rename = "next")]
    Next(NextMessage),
    #[serde(rename = "get")]
    Get(GetMessage),
    #[serde(rename = "sequences")]
    Sequences(SequencesRequest),
}

impl ParsedMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedMessage::Start(m) => m.seq,
            ParsedMessage::Next(m) => m.seq,
            ParsedMessage::Get(m) => m.seq,
            ParsedMessage::Sequences(m) => m.seq,
        }
    }
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartedType {
    #[serde(rename = "started")]
    Started,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    #[serde(rename = "state")]
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequencesType {
    #[serde(rename = "sequences")]
    Sequences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "invalid_sequence")]
    InvalidSequence,
    #[serde(rename = "not_found")]
    NotFound,
    #[serde(rename = "move_failed")]
    MoveFailed,
    #[serde(rename = "internal")]
    Internal,
}

impl From<&SessionError> for ErrorCode {
    fn from(value: &SessionError) -> Self {
        match value {
            SessionError::NotFound(_) => ErrorCode::NotFound,
            SessionError::InvalidSequence(_) => ErrorCode::InvalidSequence,
            SessionError::MoveFailed(_) => ErrorCode::MoveFailed,
            SessionError::Io(_) => ErrorCode::Internal,
        }
    }
}

/// Reply to `start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedMessage {
    #[serde(rename = "type")]
    pub msg_type: StartedType,
    pub seq: u64,
    pub game_id: String,
    pub state: GameStateView,
}

/// Reply to `next` and `get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(rename = "type")]
    pub msg_type: StateType,
    pub seq: u64,
    pub state: GameStateView,
}

/// Reply to `sequences`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencesMessage {
    #[serde(rename = "type")]
    pub msg_type: SequencesType,
    pub seq: u64,
    pub sequences: Vec<SequenceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
    /// Placement failure kind (`out_of_bounds`, `no_legal_placement`) for `move_failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Any message the server writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Started(StartedMessage),
    State(StateMessage),
    Sequences(SequencesMessage),
    Error(ErrorMessage),
}

// ============== Views ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellView {
    pub x: i32,
    pub y: i32,
}

impl From<Cell> for CellView {
    fn from(value: Cell) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveView {
    pub piece_type: String,
    pub column: u8,
    pub height_after: u32,
    pub rows_cleared: Vec<u32>,
}

impl From<&MoveRecord> for MoveView {
    fn from(value: &MoveRecord) -> Self {
        Self {
            piece_type: value.kind.as_str().to_string(),
            column: value.column,
            height_after: value.height_after,
            rows_cleared: value.rows_cleared.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLower {
    #[serde(rename = "playing")]
    Playing,
    #[serde(rename = "completed")]
    Completed,
}

impl From<GameStatus> for StatusLower {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::Playing => Self::Playing,
            GameStatus::Completed => Self::Completed,
        }
    }
}

/// Wire form of a [`GameSnapshot`], field for field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateView {
    pub sequence: String,
    pub current_step: usize,
    pub total_steps: usize,
    pub grid: Vec<CellView>,
    pub moves_history: Vec<MoveView>,
    pub current_height: u32,
    pub status: StatusLower,
}

impl From<&GameSnapshot> for GameStateView {
    fn from(value: &GameSnapshot) -> Self {
        Self {
            sequence: value.sequence.clone(),
            current_step: value.current_step,
            total_steps: value.total_steps,
            grid: value.grid.iter().copied().map(CellView::from).collect(),
            moves_history: value.moves_history.iter().map(MoveView::from).collect(),
            current_height: value.current_height,
            status: value.status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceView {
    pub sequence: String,
    pub expected_height: u32,
    pub piece_count: usize,
}

impl From<&SequenceInfo> for SequenceView {
    fn from(value: &SequenceInfo) -> Self {
        Self {
            sequence: value.sequence.clone(),
            expected_height: value.expected_height,
            piece_count: value.piece_count,
        }
    }
}

// ============== Message Parsing ==============

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    serde_json::from_str(json)
}

/// Recover `"seq": <n>` from a line that failed to parse
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Message Creation ==============

pub fn create_start(seq: u64, sequence: &str) -> ParsedMessage {
    ParsedMessage::Start(StartMessage {
        seq,
        sequence: sequence.to_string(),
    })
}

pub fn create_next(seq: u64, game_id: &str) -> ParsedMessage {
    ParsedMessage::Next(NextMessage {
        seq,
        game_id: game_id.to_string(),
    })
}

pub fn create_get(seq: u64, game_id: &str) -> ParsedMessage {
    ParsedMessage::Get(GetMessage {
        seq,
        game_id: game_id.to_string(),
    })
}

pub fn create_started(seq: u64, game_id: String, snapshot: &GameSnapshot) -> StartedMessage {
    StartedMessage {
        msg_type: StartedType::Started,
        seq,
        game_id,
        state: GameStateView::from(snapshot),
    }
}

pub fn create_state(seq: u64, snapshot: &GameSnapshot) -> StateMessage {
    StateMessage {
        msg_type: StateType::State,
        seq,
        state: GameStateView::from(snapshot),
    }
}

pub fn create_sequences(seq: u64, list: &[SequenceInfo]) -> SequencesMessage {
    SequencesMessage {
        msg_type: SequencesType::Sequences,
        seq,
        sequences: list.iter().map(SequenceView::from).collect(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
        reason: None,
    }
}

pub fn create_session_error(seq: u64, err: &SessionError) -> ErrorMessage {
    let mut msg = create_error(seq, ErrorCode::from(err), &err.to_string());
    if let SessionError::MoveFailed(e) = err {
        msg.reason = Some(e.code().to_string());
    }
    msg
}
