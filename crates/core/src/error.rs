use thiserror::Error;

use crate::types::PieceKind;

/// Failure to place a piece on the board
///
/// Returned by [`Board::apply`](crate::board::Board::apply) and propagated by
/// [`Game::advance`](crate::game::Game::advance). A failed placement never
/// mutates the board or the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("piece {kind} at column {column} would extend beyond grid boundaries")]
    OutOfBounds { kind: PieceKind, column: i32 },
    #[error("cannot place piece {kind} at column {column}")]
    NoLegalPlacement { kind: PieceKind, column: i32 },
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds { .. } => "out_of_bounds",
            PlaceError::NoLegalPlacement { .. } => "no_legal_placement",
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            PlaceError::OutOfBounds { kind, .. } | PlaceError::NoLegalPlacement { kind, .. } => {
                kind
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_messages() {
        let err = PlaceError::OutOfBounds {
            kind: PieceKind::I,
            column: 8,
        };
        assert_eq!(err.code(), "out_of_bounds");
        assert_eq!(err.kind(), PieceKind::I);
        assert_eq!(
            err.to_string(),
            "piece I at column 8 would extend beyond grid boundaries"
        );

        let err = PlaceError::NoLegalPlacement {
            kind: PieceKind::Q,
            column: 0,
        };
        assert_eq!(err.code(), "no_legal_placement");
        assert_eq!(err.to_string(), "cannot place piece Q at column 0");
    }
}
