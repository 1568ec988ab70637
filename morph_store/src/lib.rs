//! Design persistence for the morphology editor.
//!
//! Designs are stored as pretty-printed JSON documents. Loading validates the
//! whole document before anything is returned, so callers can swap the
//! result in atomically or keep their current state on error. Saving refuses
//! designs whose object names are not unique.

pub mod document;

use morph_core::{DesignState, ObjectSet};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use document::{DesignDocument, DESIGN_FORMAT_VERSION};

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while loading a design
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read design: {0}")]
    Io(String),

    #[error("Failed to parse design: {0}")]
    Parse(String),

    #[error("Unsupported design version: {0}")]
    UnsupportedVersion(u32),

    #[error("Inconsistent design: {0}")]
    Inconsistent(String),
}

/// A name used by more than one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    pub count: usize,
}

impl fmt::Display for DuplicateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.count)
    }
}

/// Errors raised while saving a design
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("All object names must be unique. Used more than once: {}", list_duplicates(.0))]
    DuplicateNames(Vec<DuplicateName>),

    #[error("Failed to serialize design: {0}")]
    Serialize(String),

    #[error("Failed to write design: {0}")]
    Io(String),
}

fn list_duplicates(duplicates: &[DuplicateName]) -> String {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks that every object name is used once, reporting offenders in name order
pub fn validate_unique_names(objects: &ObjectSet) -> Result<(), SaveError> {
    let duplicates: Vec<DuplicateName> = objects
        .duplicate_names()
        .into_iter()
        .map(|(name, count)| DuplicateName { name, count })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(SaveError::DuplicateNames(duplicates))
    }
}

/// Loads and saves design documents.
pub struct DesignStore;

impl DesignStore {
    /// Serializes a design after validating its names
    pub fn to_json(state: &DesignState) -> Result<String, SaveError> {
        validate_unique_names(&state.objects)?;
        let document = DesignDocument::from_state(state);
        serde_json::to_string_pretty(&document).map_err(|err| SaveError::Serialize(err.to_string()))
    }

    /// Parses and validates a design
    pub fn from_json(text: &str) -> LoadResult<DesignState> {
        let document: DesignDocument =
            serde_json::from_str(text).map_err(|err| LoadError::Parse(err.to_string()))?;
        document.into_state()
    }

    pub fn save(path: impl AsRef<Path>, state: &DesignState) -> Result<(), SaveError> {
        let path = path.as_ref();
        let json = Self::to_json(state)?;
        fs::write(path, json).map_err(|err| SaveError::Io(err.to_string()))?;
        log::info!(
            "Saved design ({} objects) to {}",
            state.objects.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> LoadResult<DesignState> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| LoadError::Io(err.to_string()))?;
        let state = Self::from_json(&text)?;
        log::info!(
            "Loaded {}x{} design ({} objects) from {}",
            state.grid.width(),
            state.grid.height(),
            state.objects.len(),
            path.display()
        );
        Ok(state)
    }
}
