//! Persisted design document
//!
//! The document stores what cannot be derived: cell types, the enabled edge
//! set (toggling is independent of painting) and object names keyed by their
//! member cells. Ephemeral object ids are not stored.

use crate::{LoadError, LoadResult};
use morph_core::{restore_objects, CellId, CellType, DesignObject, DesignState, Grid, NameCounter};
use serde::{Deserialize, Serialize};

/// Current version of the design format
pub const DESIGN_FORMAT_VERSION: u32 = 1;

/// Serializable design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocument {
    /// Version of the design format (for future migrations)
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major cell types
    pub cells: Vec<CellType>,
    /// Enabled edges as `[low, high]` pairs, sorted
    pub edges: Vec<(CellId, CellId)>,
    /// Object names and the cells they covered when saved
    pub objects: Vec<DesignObject>,
    /// Next value of the auto-name counter
    pub name_counter: u64,
}

impl DesignDocument {
    /// Captures a design state
    pub fn from_state(state: &DesignState) -> Self {
        let grid = &state.grid;
        Self {
            version: DESIGN_FORMAT_VERSION,
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().iter().map(|cell| cell.kind()).collect(),
            edges: grid
                .edges()
                .into_iter()
                .map(|edge| (edge.low(), edge.high()))
                .collect(),
            objects: state.objects.objects().to_vec(),
            name_counter: state.names.peek(),
        }
    }

    /// Validates the document and rebuilds the design state.
    ///
    /// Names are re-migrated from the stored objects onto freshly discovered
    /// components, so a document whose object list disagrees with its grid
    /// still loads consistently.
    pub fn into_state(self) -> LoadResult<DesignState> {
        if self.version != DESIGN_FORMAT_VERSION {
            return Err(LoadError::UnsupportedVersion(self.version));
        }
        if self.name_counter == 0 {
            return Err(LoadError::Inconsistent(
                "name counter must start at 1 or above".to_string(),
            ));
        }

        let grid = Grid::from_parts(self.width, self.height, &self.cells, &self.edges)
            .map_err(|err| LoadError::Inconsistent(err.to_string()))?;
        let mut names = NameCounter::starting_at(self.name_counter);
        let objects = restore_objects(&grid, self.objects, &mut names)
            .map_err(|err| LoadError::Inconsistent(err.to_string()))?;

        Ok(DesignState {
            grid,
            objects,
            names,
        })
    }
}
