//! Example sequences offered to clients
//!
//! Read from a plain text file (one sequence per line, `#` starts a comment
//! line). When the file does not exist a small built-in list is used instead.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::final_height;
use crate::session::SessionError;

/// Sequences used when no example file is present
pub const DEFAULT_SEQUENCES: [&str; 4] = ["Q0", "Q0,Q1", "I0,I4", "Q0,Q2,Q4,Q6,Q8"];

/// An example sequence with its precomputed outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceInfo {
    pub sequence: String,
    pub expected_height: u32,
    /// Comma-separated tokens in the raw line, valid or not
    pub piece_count: usize,
}

impl SequenceInfo {
    /// Evaluate a sequence; `None` if one of its placements fails
    pub fn evaluate(sequence: &str) -> Option<Self> {
        match final_height(sequence) {
            Ok(expected_height) => Some(Self {
                sequence: sequence.to_string(),
                expected_height,
                piece_count: sequence.split(',').count(),
            }),
            Err(e) => {
                warn!(sequence, error = %e, "skipping example sequence");
                None
            }
        }
    }
}

/// Parse an example file body
pub fn parse_sequence_list(text: &str) -> Vec<SequenceInfo> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(SequenceInfo::evaluate)
        .collect()
}

/// The built-in examples
pub fn default_sequences() -> Vec<SequenceInfo> {
    DEFAULT_SEQUENCES
        .iter()
        .filter_map(|s| SequenceInfo::evaluate(s))
        .collect()
}

/// Load examples from `path`, falling back to [`DEFAULT_SEQUENCES`] if it is missing
pub fn load_sequences(path: impl AsRef<Path>) -> Result<Vec<SequenceInfo>, SessionError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let list = parse_sequence_list(&text);
            debug!(path = %path.display(), count = list.len(), "loaded example sequences");
            Ok(list)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "example file missing, using defaults");
            Ok(default_sequences())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_have_known_heights() {
        let list = default_sequences();
        let heights: Vec<_> = list.iter().map(|s| s.expected_height).collect();
        assert_eq!(heights, vec![2, 4, 1, 0]);
        let counts: Vec<_> = list.iter().map(|s| s.piece_count).collect();
        assert_eq!(counts, vec![1, 2, 2, 5]);
    }

    #[test]
    fn comments_blank_lines_and_failures_are_skipped() {
        let text = "# header\n\n  Q0,Q0  \nI8\n   # indented comment\nT1\n";
        let list = parse_sequence_list(text);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].sequence, "Q0,Q0");
        assert_eq!(list[0].expected_height, 4);
        assert_eq!(list[1].sequence, "T1");
        assert_eq!(list[1].expected_height, 2);
    }

    #[test]
    fn piece_count_includes_invalid_tokens() {
        let info = SequenceInfo::evaluate("Q0,X9,I4").unwrap();
        assert_eq!(info.piece_count, 3);
        assert_eq!(info.expected_height, 2);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let list = load_sequences(dir.path().join("absent.txt")).unwrap();
        assert_eq!(list, default_sequences());
    }

    #[test]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "I0,I4,Q8").unwrap();
        writeln!(file, "# skip me").unwrap();
        let list = load_sequences(file.path()).unwrap();
        assert_eq!(list.len(), 1);
        // Row 0 clears; the top half of the square drops to the floor.
        assert_eq!(list[0].expected_height, 1);
        assert_eq!(list[0].piece_count, 3);
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_sequences(dir.path()), Err(SessionError::Io(_))));
    }
}
