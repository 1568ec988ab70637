//! Editor configuration

use crate::cell::CellType;
use crate::grid::Grid;
use crate::tool::{EditMode, ToolState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GRID_WIDTH: usize = 10;
pub const DEFAULT_GRID_HEIGHT: usize = 10;

/// Errors in an editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Startup configuration for a design environment
///
/// Every field is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub width: usize,
    pub height: usize,
    pub mode: EditMode,
    pub selector: CellType,
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::checked_cell_count(self.width, self.height)
            .map(|_| ())
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn tool(&self) -> ToolState {
        ToolState::new(self.mode, self.selector)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            mode: EditMode::Voxels,
            selector: CellType::Soft,
        }
    }
}
