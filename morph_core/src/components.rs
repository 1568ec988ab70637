//! Component discovery
//!
//! Partitions the non-Empty cells of a grid into connected components over
//! enabled edges. Seeds are taken in row-major order and each component is
//! walked depth-first with an explicit stack, exploring candidates left,
//! right, up, down. The visit order is what identity migration searches, so
//! it must stay stable for a given grid.

use crate::cell::CellId;
use crate::grid::Grid;

/// Discovers every component, in seed (scan) order.
///
/// Each component lists its cells in visit order; the first entry is always
/// the component's lowest id.
pub fn discover_components(grid: &Grid) -> Vec<Vec<CellId>> {
    let mut visited = vec![false; grid.cell_count()];
    let mut components = Vec::new();

    for seed in grid.occupied() {
        if visited[seed.index()] {
            continue;
        }
        components.push(explore(grid, seed, &mut visited));
    }

    components
}

/// Walks one component starting from `seed`.
///
/// Candidates are pushed in reverse so they pop in left, right, up, down
/// order, and cells are marked when popped. This reproduces the preorder of a
/// recursive depth-first walk without recursion.
fn explore(grid: &Grid, seed: CellId, visited: &mut [bool]) -> Vec<CellId> {
    let mut nodes = Vec::new();
    let mut stack = vec![seed];

    while let Some(current) = stack.pop() {
        if visited[current.index()] {
            continue;
        }
        visited[current.index()] = true;
        nodes.push(current);

        let candidates: Vec<CellId> = grid
            .linked_neighbors(current)
            .filter(|neighbor| !grid.kind(*neighbor).is_empty() && !visited[neighbor.index()])
            .collect();
        stack.extend(candidates.into_iter().rev());
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;

    fn id(i: usize) -> CellId {
        CellId::new(i)
    }

    fn paint(grid: &mut Grid, cells: &[usize]) {
        for &i in cells {
            grid.set_cell_type(id(i), CellType::Soft).unwrap();
        }
    }

    #[test]
    fn test_empty_grid_has_no_components() {
        let grid = Grid::new(4, 4).unwrap();
        assert!(discover_components(&grid).is_empty());
    }

    #[test]
    fn test_components_follow_scan_order() {
        // . A . B
        // . A . .
        let mut grid = Grid::new(4, 2).unwrap();
        paint(&mut grid, &[3, 1, 5]);
        let components = discover_components(&grid);
        assert_eq!(components, vec![vec![id(1), id(5)], vec![id(3)]]);
    }

    #[test]
    fn test_disabled_edge_separates_neighbors() {
        let mut grid = Grid::new(2, 1).unwrap();
        paint(&mut grid, &[0, 1]);
        grid.toggle_edge(id(0), id(1)).unwrap();
        assert_eq!(discover_components(&grid), vec![vec![id(0)], vec![id(1)]]);
    }

    #[test]
    fn test_edges_into_empty_cells_are_ignored() {
        let mut grid = Grid::new(3, 1).unwrap();
        paint(&mut grid, &[0]);
        grid.toggle_edge(id(0), id(1)).unwrap();
        grid.toggle_edge(id(1), id(2)).unwrap();
        grid.set_cell_type(id(2), CellType::Rigid).unwrap();
        // 1 is Empty, so 0 and 2 stay apart even though edges run through it
        assert_eq!(discover_components(&grid), vec![vec![id(0)], vec![id(2)]]);
    }

    #[test]
    fn test_visit_order_is_depth_first_left_right_up_down() {
        // 0 1 2
        // 3 4 5
        // The seed 0 reaches 1 (right) before 3 (down), and 1's subtree is
        // finished before 3 is visited.
        let mut grid = Grid::new(3, 2).unwrap();
        paint(&mut grid, &[0, 1, 2, 3, 4, 5]);
        let components = discover_components(&grid);
        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0],
            vec![id(0), id(1), id(2), id(5), id(4), id(3)]
        );
    }

    #[test]
    fn test_large_grid_does_not_overflow() {
        let (width, height) = (300, 300);
        let mut grid = Grid::new(width, height).unwrap();
        // Serpentine path: one long component
        for y in 0..height {
            for x in 0..width {
                let on_path = y % 2 == 0 || (y % 4 == 1 && x == width - 1) || (y % 4 == 3 && x == 0);
                if on_path {
                    grid.set_cell_type(grid.id_at(x, y).unwrap(), CellType::Soft)
                        .unwrap();
                }
            }
        }
        let components = discover_components(&grid);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), grid.occupied().count());
    }
}
