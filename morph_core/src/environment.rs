//! DesignEnvironment orchestrator
//!
//! Owns the grid, the current object generation and the name counter, and
//! sequences one tick at a time: tool update, at most one mutation, full
//! recompute when the structure changed, then hover/selection resolution.

use crate::{
    cell::{CellId, CellType},
    config::EditorConfig,
    error::GridError,
    grid::Grid,
    identity::{self, NameCounter},
    interaction::{resolve_owner, InteractionTarget, ResolvedTarget, TickInput},
    mutation::{CellChange, Mutation},
    object::{ObjectId, ObjectSet},
    snapshot::EnvironmentSnapshot,
    tool::{EditMode, ToolState},
};

/// Everything a design consists of; swapped as one unit on load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignState {
    pub grid: Grid,
    pub objects: ObjectSet,
    pub names: NameCounter,
}

impl DesignState {
    /// Empty design of the given size
    pub fn blank(width: usize, height: usize) -> Result<Self, GridError> {
        let grid = Grid::new(width, height)?;
        let objects = ObjectSet::empty(grid.cell_count());
        Ok(Self {
            grid,
            objects,
            names: NameCounter::new(),
        })
    }
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Mutation applied this tick, if any
    pub mutation: Option<Mutation>,
    /// The object generation was replaced; ephemeral ids from earlier ticks
    /// are no longer valid
    pub objects_replaced: bool,
    pub hovered: Option<ObjectId>,
    pub selected: Option<ObjectId>,
}

/// The design environment
pub struct DesignEnvironment {
    state: DesignState,
    tool: ToolState,
    hovered: Option<ObjectId>,
    selected: Option<ObjectId>,
}

impl DesignEnvironment {
    /// Create a blank environment from configuration
    pub fn new(config: &EditorConfig) -> Result<Self, GridError> {
        let state = DesignState::blank(config.width, config.height)?;
        Ok(Self::from_state(state, config.tool()))
    }

    pub fn from_state(state: DesignState, tool: ToolState) -> Self {
        Self {
            state,
            tool,
            hovered: None,
            selected: None,
        }
    }

    /// Run one tick
    ///
    /// Targets are validated before anything changes, so an invalid event
    /// leaves the environment untouched.
    pub fn tick(&mut self, input: &TickInput) -> Result<TickOutcome, GridError> {
        let hovered = self.validate(input.hovered)?;
        let selected = self.validate(input.selected)?;
        self.tool = input.tool;

        let mutation = self.apply_pointer(hovered, input.pressed, input.held)?;

        self.hovered = hovered.and_then(|target| self.owner_of(target));
        self.selected = selected.and_then(|target| self.owner_of(target));

        Ok(TickOutcome {
            mutation,
            objects_replaced: mutation.is_some(),
            hovered: self.hovered,
            selected: self.selected,
        })
    }

    fn validate(
        &self,
        target: Option<InteractionTarget>,
    ) -> Result<Option<ResolvedTarget>, GridError> {
        target
            .map(|target| target.validate(&self.state.grid))
            .transpose()
    }

    fn apply_pointer(
        &mut self,
        hovered: Option<ResolvedTarget>,
        pressed: bool,
        held: bool,
    ) -> Result<Option<Mutation>, GridError> {
        match (self.tool.mode, hovered) {
            (EditMode::Edges, Some(ResolvedTarget::Edge(edge))) if pressed => {
                let enabled = self.toggle_edge(edge.low(), edge.high())?;
                Ok(Some(Mutation::Edge {
                    a: edge.low(),
                    b: edge.high(),
                    enabled,
                }))
            }
            (EditMode::Voxels, Some(ResolvedTarget::Cell(id))) if held => {
                let kind = self.tool.selector;
                let change = self.set_cell_type(id, kind)?;
                Ok(change
                    .needs_recompute()
                    .then_some(Mutation::Cell { id, kind, change }))
            }
            _ => Ok(None),
        }
    }

    fn owner_of(&self, target: ResolvedTarget) -> Option<ObjectId> {
        resolve_owner(&self.state.grid, &self.state.objects, target)
    }

    /// Set a cell's type, recomputing objects unless nothing changed
    pub fn set_cell_type(&mut self, id: CellId, kind: CellType) -> Result<CellChange, GridError> {
        let change = self.state.grid.set_cell_type(id, kind)?;
        if change.needs_recompute() {
            log::debug!("cell {} -> {} ({:?})", id, kind, change);
            self.recompute();
        }
        Ok(change)
    }

    /// Flip an edge and recompute; returns the new enablement
    pub fn toggle_edge(&mut self, a: CellId, b: CellId) -> Result<bool, GridError> {
        let enabled = self.state.grid.toggle_edge(a, b)?;
        log::debug!("edge {}-{} -> {}", a, b, if enabled { "on" } else { "off" });
        self.recompute();
        Ok(enabled)
    }

    /// Replace the object generation with a freshly discovered, renamed one
    pub fn recompute(&mut self) {
        let next = identity::recompute(
            &self.state.grid,
            &self.state.objects,
            &mut self.state.names,
        );
        log::debug!(
            "recomputed objects: {} -> {}",
            self.state.objects.len(),
            next.len()
        );
        self.state.objects = next;
        // Ids from the old generation are meaningless now
        self.hovered = None;
        self.selected = None;
    }

    /// Assign a user-chosen name
    pub fn rename_object(&mut self, id: ObjectId, name: impl Into<String>) -> Result<(), GridError> {
        self.state.objects.rename(id, name.into())
    }

    /// Resolve a target without mutating anything
    pub fn resolve(&self, target: InteractionTarget) -> Result<Option<ObjectId>, GridError> {
        let resolved = target.validate(&self.state.grid)?;
        Ok(self.owner_of(resolved))
    }

    /// Hovered object if any, otherwise the selected one
    pub fn focused_object(&self) -> Option<ObjectId> {
        self.hovered.or(self.selected)
    }

    /// Names carried by more than one object, with their counts
    pub fn duplicate_names(&self) -> Vec<(String, usize)> {
        self.state.objects.duplicate_names()
    }

    /// Atomically replace the whole design; clears hover and selection
    pub fn replace_state(&mut self, state: DesignState) {
        self.state = state;
        self.hovered = None;
        self.selected = None;
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        let grid = &self.state.grid;
        EnvironmentSnapshot {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().iter().map(|cell| cell.kind()).collect(),
            edges: grid.edges(),
            objects: self.state.objects.objects().to_vec(),
            hovered: self.hovered,
            selected: self.selected,
            name_counter: self.state.names.peek(),
            tool: self.tool,
        }
    }

    // Public accessors for rendering/testing
    pub fn state(&self) -> &DesignState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn objects(&self) -> &ObjectSet {
        &self.state.objects
    }

    pub fn name_counter(&self) -> NameCounter {
        self.state.names
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }
}
