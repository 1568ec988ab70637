//! Read-only environment snapshot for renderers and exporters

use crate::cell::{CellId, CellType};
use crate::grid::EdgeKey;
use crate::object::{DesignObject, ObjectId};
use crate::tool::ToolState;
use serde::Serialize;

/// Complete, serializable view of the environment state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cell types
    pub cells: Vec<CellType>,
    pub edges: Vec<EdgeKey>,
    /// Objects indexed by their ephemeral id
    pub objects: Vec<DesignObject>,
    pub hovered: Option<ObjectId>,
    pub selected: Option<ObjectId>,
    pub name_counter: u64,
    pub tool: ToolState,
}

impl EnvironmentSnapshot {
    pub fn cell(&self, id: CellId) -> Option<CellType> {
        self.cells.get(id.index()).copied()
    }

    /// Renders the grid as rows of type glyphs
    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|kind| kind.glyph()).collect())
            .collect()
    }

    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in determinism tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());

        for kind in &self.cells {
            hasher.update([*kind as u8]);
        }

        for edge in &self.edges {
            hasher.update(edge.low().index().to_le_bytes());
            hasher.update(edge.high().index().to_le_bytes());
        }

        for object in &self.objects {
            hasher.update(object.name.as_bytes());
            hasher.update(b"\0");
            for node in &object.nodes {
                hasher.update(node.index().to_le_bytes());
            }
            hasher.update(b"\n");
        }

        hasher.update(self.name_counter.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
