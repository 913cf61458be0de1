//! TCP server for the simulation adapter
//!
//! Handles incoming connections and answers each request line with exactly
//! one response line. Uses tokio for async networking; all clients share one
//! [`SessionStore`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::sequences::{load_sequences, SequenceInfo};
use crate::session::{SessionStore, DEFAULT_MAX_SEQUENCE_LEN};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Example sequence file; a missing file means the built-in list
    pub sequences_path: PathBuf,
    pub max_sequence_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            sequences_path: PathBuf::from("input.txt"),
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("TETRIS_SIM_HOST").unwrap_or(defaults.host);
        let port = env::var("TETRIS_SIM_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let sequences_path = env::var("TETRIS_SIM_SEQUENCES")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.sequences_path);

        let max_sequence_len = env::var("TETRIS_SIM_MAX_SEQUENCE_LEN")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_sequence_len);

        Self {
            host,
            port,
            sequences_path,
            max_sequence_len,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Bytes allowed on a request line beyond the sequence itself (JSON envelope)
pub const LINE_OVERHEAD: usize = 1024;

/// Shared server state
pub struct ServerState {
    sessions: SessionStore,
    sequences: Vec<SequenceInfo>,
}

impl ServerState {
    pub fn new(sessions: SessionStore, sequences: Vec<SequenceInfo>) -> Self {
        Self {
            sessions,
            sequences,
        }
    }

    /// Build state from config, loading the example sequences
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let sequences = load_sequences(&config.sequences_path).with_context(|| {
            format!(
                "failed to load example sequences from {}",
                config.sequences_path.display()
            )
        })?;
        Ok(Self::new(
            SessionStore::new(config.max_sequence_len),
            sequences,
        ))
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn sequences(&self) -> &[SequenceInfo] {
        &self.sequences
    }

    /// Longest request line a client may send, newline included
    pub fn max_line_len(&self) -> usize {
        self.sessions.max_sequence_len() + LINE_OVERHEAD
    }
}

/// Start the TCP server
///
/// The bound address is sent on `ready_tx` once listening (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let state = Arc::new(ServerState::from_config(&config)?);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    info!(
        addr = %bound,
        examples = state.sequences().len(),
        "adapter listening"
    );
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, state).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
///
/// Lines are read through a `take` limit so an oversized request never grows
/// the buffer past [`ServerState::max_line_len`]. The rest of such a line is
/// discarded in bounded chunks and the request is answered with
/// `invalid_message`.
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let limit = state.max_line_len() as u64;

    let mut raw: Vec<u8> = Vec::with_capacity(4096);
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    loop {
        raw.clear();
        let bytes_read = (&mut reader)
            .take(limit)
            .read_until(b'\n', &mut raw)
            .await?;

        if bytes_read == 0 {
            // Client disconnected
            break;
        }

        let too_long = bytes_read as u64 == limit && raw.last() != Some(&b'\n');
        let response = if too_long {
            warn!(client_id, limit, "request line too long");
            let seq = extract_seq_best_effort(&String::from_utf8_lossy(&raw)).unwrap_or(0);
            loop {
                raw.clear();
                let n = (&mut reader)
                    .take(limit)
                    .read_until(b'\n', &mut raw)
                    .await?;
                if n == 0 || raw.last() == Some(&b'\n') {
                    break;
                }
            }
            ServerMessage::Error(create_error(
                seq,
                ErrorCode::InvalidMessage,
                &format!("request line exceeds {limit} bytes"),
            ))
        } else {
            let line = String::from_utf8_lossy(&raw);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(client_id, line = trimmed, "request");
            handle_line(&state, trimmed).await
        };

        buf.clear();
        serde_json::to_writer(&mut buf, &response)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Answer one request line
pub async fn handle_line(state: &ServerState, line: &str) -> ServerMessage {
    let msg = match parse_message(line) {
        Ok(msg) => msg,
        Err(e) => {
            let seq = extract_seq_best_effort(line).unwrap_or(0);
            return ServerMessage::Error(create_error(
                seq,
                ErrorCode::InvalidMessage,
                &format!("invalid message: {e}"),
            ));
        }
    };

    let seq = msg.seq();
    let result = match msg {
        ParsedMessage::Start(m) => state
            .sessions
            .start(&m.sequence)
            .await
            .map(|(id, snap)| ServerMessage::Started(create_started(seq, id, &snap))),
        ParsedMessage::Next(m) => state
            .sessions
            .next(&m.game_id)
            .await
            .map(|snap| ServerMessage::State(create_state(seq, &snap))),
        ParsedMessage::Get(m) => state
            .sessions
            .get(&m.game_id)
            .await
            .map(|snap| ServerMessage::State(create_state(seq, &snap))),
        ParsedMessage::Sequences(_) => Ok(ServerMessage::Sequences(create_sequences(
            seq,
            &state.sequences,
        ))),
    };

    result.unwrap_or_else(|e| {
        debug!(seq, error = %e, "request failed");
        ServerMessage::Error(create_session_error(seq, &e))
    })
}
