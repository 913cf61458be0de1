//! Shapes module - piece footprints relative to a bottom-left anchor
//!
//! Pieces never rotate: each kind has exactly one orientation, so the
//! catalog is a flat table of four offsets per kind.

use crate::types::{Cell, PieceKind};

/// Offset of a single cell relative to the piece anchor, as (dx, dy)
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const Q_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];
const I_SHAPE: PieceShape = [(0, 0), (1, 0), (2, 0), (3, 0)];
const T_SHAPE: PieceShape = [(0, 1), (1, 1), (2, 1), (1, 0)];
const Z_SHAPE: PieceShape = [(0, 1), (1, 1), (1, 0), (2, 0)];
const S_SHAPE: PieceShape = [(1, 1), (2, 1), (0, 0), (1, 0)];
const L_SHAPE: PieceShape = [(0, 0), (0, 1), (0, 2), (1, 0)];
const J_SHAPE: PieceShape = [(1, 0), (1, 1), (1, 2), (0, 0)];

/// Get the shape (cell offsets) for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static PieceShape {
    match kind {
        PieceKind::Q => &Q_SHAPE,
        PieceKind::I => &I_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::L => &L_SHAPE,
        PieceKind::J => &J_SHAPE,
    }
}

/// Horizontal extent of a shape as (min_dx, max_dx)
pub fn shape_span(kind: PieceKind) -> (i8, i8) {
    let mut min_dx = i8::MAX;
    let mut max_dx = i8::MIN;
    for &(dx, _) in get_shape(kind) {
        min_dx = min_dx.min(dx);
        max_dx = max_dx.max(dx);
    }
    (min_dx, max_dx)
}

/// Absolute cells occupied by a piece anchored at (column, row)
#[inline]
pub fn piece_cells(kind: PieceKind, column: i32, row: i32) -> [Cell; 4] {
    get_shape(kind).map(|(dx, dy)| Cell::new(column + dx as i32, row + dy as i32))
}
