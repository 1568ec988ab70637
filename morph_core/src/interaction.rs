//! Interaction events and their resolution to objects

use crate::cell::CellId;
use crate::error::GridError;
use crate::grid::{EdgeKey, Grid};
use crate::object::{ObjectId, ObjectSet};
use crate::tool::ToolState;
use serde::{Deserialize, Serialize};

/// What the pointer is over, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionTarget {
    Cell(CellId),
    /// Unordered pair of adjacent cells
    Edge(CellId, CellId),
}

/// A target checked against the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTarget {
    Cell(CellId),
    Edge(EdgeKey),
}

impl InteractionTarget {
    /// Validates ids and adjacency
    pub fn validate(self, grid: &Grid) -> Result<ResolvedTarget, GridError> {
        match self {
            InteractionTarget::Cell(id) => {
                grid.check_cell(id)?;
                Ok(ResolvedTarget::Cell(id))
            }
            InteractionTarget::Edge(a, b) => grid.edge(a, b).map(ResolvedTarget::Edge),
        }
    }
}

/// Input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Active mode and selector for this tick
    pub tool: ToolState,
    pub hovered: Option<InteractionTarget>,
    pub selected: Option<InteractionTarget>,
    /// Pointer went down this tick
    #[serde(default)]
    pub pressed: bool,
    /// Pointer is held down
    #[serde(default)]
    pub held: bool,
}

impl TickInput {
    pub fn new(tool: ToolState) -> Self {
        Self {
            tool,
            ..Self::default()
        }
    }

    pub fn hovering(mut self, target: InteractionTarget) -> Self {
        self.hovered = Some(target);
        self
    }

    pub fn selecting(mut self, target: Option<InteractionTarget>) -> Self {
        self.selected = target;
        self
    }

    pub fn pressed(mut self) -> Self {
        self.pressed = true;
        self.held = true;
        self
    }

    pub fn held(mut self) -> Self {
        self.held = true;
        self
    }
}

/// Maps a validated target to the object that owns it.
///
/// A cell resolves to its owner, or nothing if Empty. An edge resolves
/// through its lower-id endpoint only; the other endpoint may belong to a
/// different object or none.
pub fn resolve_owner(grid: &Grid, objects: &ObjectSet, target: ResolvedTarget) -> Option<ObjectId> {
    let cell = match target {
        ResolvedTarget::Cell(id) => id,
        ResolvedTarget::Edge(edge) => edge.low(),
    };
    if grid.kind(cell).is_empty() {
        return None;
    }
    objects.owner(cell)
}
