//! # Morph Core
//!
//! Grid and object model for the morphology design editor.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same grid content => same objects, ids and names
//! - **Full recompute**: Every structural edit rebuilds the object generation
//! - **Names carry identity**: Object ids are ephemeral, names migrate
//! - **Mechanism over policy**: Hosts decide rendering, file paths and prompts
//!
//! ## Design
//!
//! The core provides:
//! - Grid: Fixed-size cell store with symmetric, toggleable edges
//! - Component discovery: Stack-based flood fill in a fixed candidate order
//! - Identity migration: First-match name inheritance across generations
//! - DesignEnvironment: Tick-driven orchestrator owning all state
//! - EnvironmentSnapshot: Read-only view for renderers and exporters

pub mod cell;
pub mod components;
pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod identity;
pub mod interaction;
pub mod mutation;
pub mod object;
pub mod snapshot;
pub mod tool;

pub use cell::{Cell, CellId, CellType, Direction, EdgeMask};
pub use components::discover_components;
pub use config::{ConfigError, EditorConfig};
pub use environment::{DesignEnvironment, DesignState, TickOutcome};
pub use error::GridError;
pub use grid::{EdgeKey, Grid};
pub use identity::{migrate_names, restore_objects, NameCounter, AUTO_NAME_PREFIX};
pub use interaction::{resolve_owner, InteractionTarget, ResolvedTarget, TickInput};
pub use mutation::{CellChange, Mutation};
pub use object::{ComponentIndex, DesignObject, ObjectId, ObjectSet};
pub use snapshot::EnvironmentSnapshot;
pub use tool::{EditMode, ToolState};
