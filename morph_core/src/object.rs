//! Objects (connected components) and the cell → object index

use crate::cell::CellId;
use crate::error::GridError;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ephemeral object id: the scan-order position of a component within one
/// generation. Not stable across recomputes; names carry identity instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(usize);

impl ObjectId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named connected component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignObject {
    pub name: String,
    /// Member cells in traversal-visit order
    pub nodes: Vec<CellId>,
}

impl DesignObject {
    pub fn new(name: impl Into<String>, nodes: Vec<CellId>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn node_set(&self) -> BTreeSet<CellId> {
        self.nodes.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Derived `cell id → owning object` lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIndex {
    owners: Vec<Option<ObjectId>>,
}

impl ComponentIndex {
    fn empty(cell_count: usize) -> Self {
        Self {
            owners: vec![None; cell_count],
        }
    }

    pub fn owner(&self, id: CellId) -> Option<ObjectId> {
        self.owners.get(id.index()).copied().flatten()
    }

    /// Number of indexed cells
    pub fn len(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One generation of objects together with its component index
///
/// Generations are immutable apart from renaming; structural edits always
/// produce a new generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSet {
    objects: Vec<DesignObject>,
    index: ComponentIndex,
}

impl ObjectSet {
    pub fn empty(cell_count: usize) -> Self {
        Self {
            objects: Vec::new(),
            index: ComponentIndex::empty(cell_count),
        }
    }

    /// Builds a generation and its index, rejecting ids outside the grid and
    /// cells claimed twice.
    pub fn from_objects(cell_count: usize, objects: Vec<DesignObject>) -> Result<Self, GridError> {
        let mut index = ComponentIndex::empty(cell_count);
        for (position, object) in objects.iter().enumerate() {
            for &node in &object.nodes {
                let slot = index
                    .owners
                    .get_mut(node.index())
                    .ok_or(GridError::CellOutOfRange { id: node, cell_count })?;
                if slot.is_some() {
                    return Err(GridError::OverlappingObjects { id: node });
                }
                *slot = Some(ObjectId::new(position));
            }
        }
        Ok(Self { objects, index })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&DesignObject> {
        self.objects.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &DesignObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId::new(i), object))
    }

    pub fn objects(&self) -> &[DesignObject] {
        &self.objects
    }

    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    pub fn owner(&self, id: CellId) -> Option<ObjectId> {
        self.index.owner(id)
    }

    /// Object currently carrying a name (first in scan order)
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Names carried by more than one object with their counts, in name order
    pub fn duplicate_names(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for object in &self.objects {
            *counts.entry(object.name.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, count)| (name.to_string(), count))
            .collect()
    }

    pub(crate) fn rename(&mut self, id: ObjectId, name: String) -> Result<(), GridError> {
        let object = self
            .objects
            .get_mut(id.index())
            .ok_or(GridError::ObjectNotFound(id))?;
        object.name = name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<CellId> {
        raw.iter().copied().map(CellId::new).collect()
    }

    #[test]
    fn test_index_tracks_owners() {
        let set = ObjectSet::from_objects(
            6,
            vec![
                DesignObject::new("a", ids(&[0, 1])),
                DesignObject::new("b", ids(&[4])),
            ],
        )
        .unwrap();

        assert_eq!(set.owner(CellId::new(1)), Some(ObjectId::new(0)));
        assert_eq!(set.owner(CellId::new(4)), Some(ObjectId::new(1)));
        assert_eq!(set.owner(CellId::new(2)), None);
        assert_eq!(set.owner(CellId::new(99)), None);
        assert_eq!(set.index().len(), 3);
        assert_eq!(set.find_by_name("b"), Some(ObjectId::new(1)));
    }

    #[test]
    fn test_overlap_rejected() {
        let result = ObjectSet::from_objects(
            4,
            vec![
                DesignObject::new("a", ids(&[0, 1])),
                DesignObject::new("b", ids(&[1])),
            ],
        );
        assert_eq!(
            result,
            Err(GridError::OverlappingObjects { id: CellId::new(1) })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = ObjectSet::from_objects(4, vec![DesignObject::new("a", ids(&[4]))]);
        assert!(matches!(result, Err(GridError::CellOutOfRange { .. })));
    }

    #[test]
    fn test_rename() {
        let mut set = ObjectSet::from_objects(2, vec![DesignObject::new("a", ids(&[0]))]).unwrap();
        set.rename(ObjectId::new(0), "Arm".to_string()).unwrap();
        assert_eq!(set.get(ObjectId::new(0)).unwrap().name, "Arm");
        assert_eq!(
            set.rename(ObjectId::new(3), "x".to_string()),
            Err(GridError::ObjectNotFound(ObjectId::new(3)))
        );
    }
}
