//! Property-based tests for the object model using proptest
//!
//! Random edit sequences must preserve:
//! - The object partition (every occupied cell in exactly one object)
//! - Index consistency with the object node lists
//! - Edge symmetry and the absence of edges off the grid
//! - Deterministic recompute
//! - Toggle involution

use morph_core::{
    discover_components, CellId, CellType, DesignEnvironment, Direction, EditorConfig, Grid,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

const WIDTH: usize = 5;
const HEIGHT: usize = 4;
const CELLS: usize = WIDTH * HEIGHT;

#[derive(Debug, Clone)]
enum Edit {
    SetType(usize, CellType),
    Toggle(usize, Direction),
}

fn cell_type() -> impl Strategy<Value = CellType> {
    prop::sample::select(CellType::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0..CELLS, cell_type()).prop_map(|(cell, kind)| Edit::SetType(cell, kind)),
        1 => (0..CELLS, direction()).prop_map(|(cell, dir)| Edit::Toggle(cell, dir)),
    ]
}

fn new_env() -> DesignEnvironment {
    DesignEnvironment::new(&EditorConfig {
        width: WIDTH,
        height: HEIGHT,
        ..EditorConfig::default()
    })
    .expect("valid dimensions")
}

fn apply(env: &mut DesignEnvironment, edit: &Edit) {
    match *edit {
        Edit::SetType(cell, kind) => {
            env.set_cell_type(CellId::new(cell), kind).unwrap();
        }
        Edit::Toggle(cell, dir) => {
            if let Some(neighbor) = env.grid().neighbor(CellId::new(cell), dir) {
                env.toggle_edge(CellId::new(cell), neighbor).unwrap();
            }
        }
    }
}

fn assert_partition(env: &DesignEnvironment) {
    let occupied: BTreeSet<CellId> = env.grid().occupied().collect();
    let mut covered = BTreeSet::new();
    for (object_id, object) in env.objects().iter() {
        assert!(!object.is_empty(), "object {} has no nodes", object_id);
        for &node in &object.nodes {
            assert!(covered.insert(node), "cell {} claimed twice", node);
            assert_eq!(env.objects().owner(node), Some(object_id));
        }
    }
    assert_eq!(covered, occupied);
    for cell in env.grid().cells() {
        if cell.is_empty() {
            assert_eq!(env.objects().owner(cell.id()), None);
        }
    }
}

fn assert_symmetric(grid: &Grid) {
    for cell in grid.cells() {
        for direction in Direction::ALL {
            if !cell.is_linked(direction) {
                continue;
            }
            let neighbor = grid
                .neighbor(cell.id(), direction)
                .expect("edge leads off the grid");
            assert!(grid.cell(neighbor).is_linked(direction.opposite()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_edits_preserve_partition(edits in prop::collection::vec(edit(), 0..60)) {
        let mut env = new_env();
        for edit in &edits {
            apply(&mut env, edit);
            assert_partition(&env);
            assert_symmetric(env.grid());
        }
    }

    #[test]
    fn prop_objects_match_fresh_discovery(edits in prop::collection::vec(edit(), 0..60)) {
        let mut env = new_env();
        for edit in &edits {
            apply(&mut env, edit);
        }
        let discovered = discover_components(env.grid());
        let nodes: Vec<Vec<CellId>> = env.objects().objects().iter().map(|o| o.nodes.clone()).collect();
        prop_assert_eq!(nodes, discovered);
    }

    #[test]
    fn prop_recompute_is_deterministic(edits in prop::collection::vec(edit(), 0..60)) {
        let mut env = new_env();
        for edit in &edits {
            apply(&mut env, edit);
        }
        let before = env.snapshot();
        env.recompute();
        prop_assert_eq!(env.snapshot(), before);
    }

    #[test]
    fn prop_toggle_twice_is_identity(
        edits in prop::collection::vec(edit(), 0..40),
        cell in 0..CELLS,
        dir in direction(),
    ) {
        let mut env = new_env();
        for edit in &edits {
            apply(&mut env, edit);
        }
        let Some(neighbor) = env.grid().neighbor(CellId::new(cell), dir) else {
            return Ok(());
        };
        let grid_before = env.grid().clone();
        env.toggle_edge(CellId::new(cell), neighbor).unwrap();
        env.toggle_edge(neighbor, CellId::new(cell)).unwrap();
        prop_assert_eq!(env.grid(), &grid_before);
    }
}
