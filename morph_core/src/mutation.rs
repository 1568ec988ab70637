//! Structural edits to the grid
//!
//! These only touch cells and edges. The caller decides whether the edit
//! requires a fresh object generation (see [`CellChange::needs_recompute`]).

use crate::cell::{CellId, CellType};
use crate::error::GridError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// What a `set_cell_type` call actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellChange {
    /// Requested type equals the current one
    Unchanged,
    /// Non-Empty cell cleared; all of its edges were disabled
    Erased,
    /// Empty cell filled; auto-connected to occupied neighbors
    Painted,
    /// Non-Empty cell switched to another non-Empty type
    Retyped,
}

impl CellChange {
    pub fn needs_recompute(self) -> bool {
        !matches!(self, CellChange::Unchanged)
    }
}

/// A completed mutation, as reported to hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Cell {
        id: CellId,
        kind: CellType,
        change: CellChange,
    },
    Edge {
        a: CellId,
        b: CellId,
        enabled: bool,
    },
}

impl Grid {
    /// Changes the type of a cell.
    ///
    /// Erasing disables every edge of the cell on both endpoints. Painting an
    /// Empty cell enables an edge to each 4-neighbor that is non-Empty.
    /// Retyping leaves edges untouched.
    pub fn set_cell_type(&mut self, id: CellId, kind: CellType) -> Result<CellChange, GridError> {
        self.check_cell(id)?;
        let previous = self.kind(id);
        if previous == kind {
            return Ok(CellChange::Unchanged);
        }

        let change = if kind.is_empty() {
            let links: Vec<CellId> = self.linked_neighbors(id).collect();
            for neighbor in links {
                let edge = self.edge(id, neighbor)?;
                self.set_edge(edge, false);
            }
            CellChange::Erased
        } else if previous.is_empty() {
            let occupied: Vec<CellId> = self
                .adjacent(id)
                .map(|(_, neighbor)| neighbor)
                .filter(|neighbor| !self.kind(*neighbor).is_empty())
                .collect();
            for neighbor in occupied {
                let edge = self.edge(id, neighbor)?;
                self.set_edge(edge, true);
            }
            CellChange::Painted
        } else {
            CellChange::Retyped
        };

        self.set_kind(id, kind);
        Ok(change)
    }

    /// Flips an edge on both endpoints and returns the new enablement.
    ///
    /// Edges touching Empty cells are accepted; component discovery never
    /// walks into Empty cells, so they carry no connectivity.
    pub fn toggle_edge(&mut self, a: CellId, b: CellId) -> Result<bool, GridError> {
        let edge = self.edge(a, b)?;
        let enabled = !self.is_edge_enabled(edge);
        self.set_edge(edge, enabled);
        Ok(enabled)
    }
}
