//! Edit modes and the active tool

use crate::cell::CellType;
use serde::{Deserialize, Serialize};

/// Edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Paint cells with the selected type (held pointer)
    #[default]
    Voxels,
    /// Toggle edges (pointer press)
    Edges,
    /// Inspect and select objects; never mutates
    Select,
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Voxels => "VOXELS",
            EditMode::Edges => "EDGES",
            EditMode::Select => "SELECT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "voxels" | "voxel" => Some(EditMode::Voxels),
            "edges" | "edge" => Some(EditMode::Edges),
            "select" => Some(EditMode::Select),
            _ => None,
        }
    }
}

/// Mode plus the cell type painted in Voxels mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    pub mode: EditMode,
    pub selector: CellType,
}

impl ToolState {
    pub const fn new(mode: EditMode, selector: CellType) -> Self {
        Self { mode, selector }
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(EditMode::Voxels, CellType::Soft)
    }
}
