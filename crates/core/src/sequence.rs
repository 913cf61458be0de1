//! Sequence module - parses textual move lists
//!
//! A sequence is a comma-separated list of tokens such as `"Q0,I4,T2"`: one
//! piece letter followed by the target column. Parsing is lenient; tokens that
//! do not describe a valid placement are dropped and the rest still parse.

use tracing::trace;

use crate::types::{PieceKind, BOARD_WIDTH};

/// A single requested placement: piece kind and anchor column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub kind: PieceKind,
    pub column: u8,
}

impl Placement {
    pub fn new(kind: PieceKind, column: u8) -> Self {
        Self { kind, column }
    }
}

/// Parse a whole sequence into placements, skipping invalid tokens
///
/// # Examples
///
/// ```
/// use tetris_sim_core::sequence::{parse_sequence, Placement};
/// use tetris_sim_core::types::PieceKind;
///
/// let moves = parse_sequence("Q0, x9 ,i4");
/// assert_eq!(
///     moves,
///     vec![Placement::new(PieceKind::Q, 0), Placement::new(PieceKind::I, 4)]
/// );
/// assert!(parse_sequence("   ").is_empty());
/// ```
pub fn parse_sequence(input: &str) -> Vec<Placement> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    input
        .split(',')
        .filter_map(|token| {
            let parsed = parse_token(token);
            if parsed.is_none() {
                trace!(token, "skipping invalid sequence token");
            }
            parsed
        })
        .collect()
}

/// Parse one token such as `"T2"` (surrounding whitespace allowed)
///
/// Returns `None` when the token is shorter than two characters, the letter
/// is not in the catalog, or the column is not an integer in `[0, BOARD_WIDTH)`.
pub fn parse_token(token: &str) -> Option<Placement> {
    let token = token.trim();
    let mut chars = token.chars();
    let letter = chars.next()?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }

    let kind = PieceKind::from_char(letter)?;
    let column: i64 = rest.trim().parse().ok()?;
    if !(0..BOARD_WIDTH as i64).contains(&column) {
        return None;
    }

    Some(Placement::new(kind, column as u8))
}
