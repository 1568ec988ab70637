//! Identity migration across object generations
//!
//! Freshly discovered components carry no names. Each one walks its members
//! in visit order and adopts the name of the first member's previous owner.
//! Components with no previously owned member get a fabricated name.

use crate::cell::CellId;
use crate::components::discover_components;
use crate::error::GridError;
use crate::grid::Grid;
use crate::object::{DesignObject, ObjectSet};
use serde::{Deserialize, Serialize};

/// Prefix of fabricated object names
pub const AUTO_NAME_PREFIX: &str = "new_object_";

/// Source of `new_object_<n>` names
///
/// Owned by the environment and persisted with the design, so numbering
/// continues across save and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameCounter(u64);

impl NameCounter {
    pub const fn new() -> Self {
        Self(1)
    }

    /// Resumes at a persisted value (0 is bumped to 1)
    pub fn starting_at(next: u64) -> Self {
        Self(next.max(1))
    }

    /// The number the next fabricated name will use
    pub fn peek(&self) -> u64 {
        self.0
    }

    pub fn fabricate(&mut self) -> String {
        let name = format!("{}{}", AUTO_NAME_PREFIX, self.0);
        self.0 += 1;
        name
    }
}

impl Default for NameCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Names new components from the previous generation.
///
/// Two fragments of a split object both find the old owner and may end up
/// with the same name. A merge keeps the name found first and drops the rest.
pub fn migrate_names(
    components: Vec<Vec<CellId>>,
    previous: &ObjectSet,
    counter: &mut NameCounter,
) -> Vec<DesignObject> {
    components
        .into_iter()
        .map(|nodes| {
            let inherited = nodes
                .iter()
                .find_map(|&node| previous.owner(node))
                .and_then(|owner| previous.get(owner))
                .map(|object| object.name.clone());
            let name = inherited.unwrap_or_else(|| counter.fabricate());
            DesignObject::new(name, nodes)
        })
        .collect()
}

/// Runs discovery and migration, producing the next generation.
pub fn recompute(grid: &Grid, previous: &ObjectSet, counter: &mut NameCounter) -> ObjectSet {
    let named = migrate_names(discover_components(grid), previous, counter);
    // Components partition distinct in-range cells, so indexing cannot fail.
    ObjectSet::from_objects(grid.cell_count(), named)
        .unwrap_or_else(|err| panic!("discovered components overlap: {}", err))
}

/// Rebuilds the generation of a loaded grid.
///
/// The stored named objects act as the previous generation, so names are
/// re-migrated exactly as they would be after an edit.
pub fn restore_objects(
    grid: &Grid,
    stored: Vec<DesignObject>,
    counter: &mut NameCounter,
) -> Result<ObjectSet, GridError> {
    let previous = ObjectSet::from_objects(grid.cell_count(), stored)?;
    Ok(recompute(grid, &previous, counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;
    use crate::object::ObjectId;

    fn id(i: usize) -> CellId {
        CellId::new(i)
    }

    fn ids(raw: &[usize]) -> Vec<CellId> {
        raw.iter().copied().map(CellId::new).collect()
    }

    #[test]
    fn test_counter_fabricates_sequential_names() {
        let mut counter = NameCounter::new();
        assert_eq!(counter.fabricate(), "new_object_1");
        assert_eq!(counter.fabricate(), "new_object_2");
        assert_eq!(counter.peek(), 3);
        assert_eq!(NameCounter::starting_at(0).peek(), 1);
    }

    #[test]
    fn test_unmatched_components_get_fresh_names() {
        let previous = ObjectSet::empty(4);
        let mut counter = NameCounter::starting_at(5);
        let named = migrate_names(vec![ids(&[0]), ids(&[3])], &previous, &mut counter);
        assert_eq!(named[0].name, "new_object_5");
        assert_eq!(named[1].name, "new_object_6");
        assert_eq!(counter.peek(), 7);
    }

    #[test]
    fn test_first_previously_owned_member_wins() {
        let previous = ObjectSet::from_objects(
            8,
            vec![
                DesignObject::new("A", ids(&[2])),
                DesignObject::new("B", ids(&[5])),
            ],
        )
        .unwrap();
        let mut counter = NameCounter::new();
        // 0 was unowned, 5 comes before 2 in visit order
        let named = migrate_names(vec![ids(&[0, 5, 2])], &previous, &mut counter);
        assert_eq!(named[0].name, "B");
        assert_eq!(counter.peek(), 1);
    }

    #[test]
    fn test_split_fragments_share_the_old_name() {
        let previous =
            ObjectSet::from_objects(4, vec![DesignObject::new("Arm", ids(&[1, 2, 3]))]).unwrap();
        let mut counter = NameCounter::new();
        let named = migrate_names(vec![ids(&[1]), ids(&[3])], &previous, &mut counter);
        assert_eq!(named[0].name, "Arm");
        assert_eq!(named[1].name, "Arm");
        assert_eq!(counter.peek(), 1);
    }

    #[test]
    fn test_restore_objects_reapplies_names() {
        let mut grid = Grid::new(3, 1).unwrap();
        for i in 0..3 {
            grid.set_cell_type(id(i), CellType::Rigid).unwrap();
        }
        let mut counter = NameCounter::starting_at(4);
        let restored =
            restore_objects(&grid, vec![DesignObject::new("Body", ids(&[0, 1, 2]))], &mut counter)
                .unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.get(ObjectId::new(0)).unwrap().name, "Body");
        assert_eq!(counter.peek(), 4);
    }

    #[test]
    fn test_restore_objects_rejects_overlap() {
        let grid = Grid::new(2, 1).unwrap();
        let mut counter = NameCounter::new();
        let result = restore_objects(
            &grid,
            vec![
                DesignObject::new("a", ids(&[0])),
                DesignObject::new("b", ids(&[0])),
            ],
            &mut counter,
        );
        assert!(result.is_err());
    }
}
