//! Error types for the design core

use crate::cell::CellId;
use crate::object::ObjectId;
use thiserror::Error;

/// Errors raised at the public boundary of the design core.
///
/// Index inconsistencies inside the grid are not represented here: they are
/// defects and abort via panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Cell {id} is outside a grid of {cell_count} cells")]
    CellOutOfRange { id: CellId, cell_count: usize },

    #[error("Cells {a} and {b} do not form an edge")]
    InvalidEdge { a: CellId, b: CellId },

    #[error("Expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("Cell {id} is claimed by more than one object")]
    OverlappingObjects { id: CellId },

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),
}
