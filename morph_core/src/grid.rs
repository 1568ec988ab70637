//! Fixed-size cell grid with 4-directional adjacency
//!
//! Cells live in a flat row-major store addressed by [`CellId`]. Edges are
//! kept as per-cell direction masks and are only ever changed in pairs, so
//! enablement stays symmetric.

use crate::cell::{Cell, CellId, CellType, Direction};
use crate::error::GridError;
use serde::Serialize;

/// Canonical unordered pair of 4-adjacent cells (lower id first)
///
/// Only the grid can build one, so every key names a real adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey(CellId, CellId);

impl EdgeKey {
    pub fn low(&self) -> CellId {
        self.0
    }

    pub fn high(&self) -> CellId {
        self.1
    }
}

/// The design grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all-Empty grid with no edges
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let count = Self::checked_cell_count(width, height)?;
        let cells = (0..count).map(|i| Cell::new(CellId::new(i))).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Rebuilds a grid from persisted cell types and enabled edges
    pub fn from_parts(
        width: usize,
        height: usize,
        kinds: &[CellType],
        edges: &[(CellId, CellId)],
    ) -> Result<Self, GridError> {
        // Checked before allocating, so a bogus header cannot size the grid
        let expected = Self::checked_cell_count(width, height)?;
        if kinds.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: kinds.len(),
            });
        }
        let mut grid = Self::new(width, height)?;
        for (cell, kind) in grid.cells.iter_mut().zip(kinds) {
            cell.set_kind(*kind);
        }
        for &(a, b) in edges {
            let edge = grid.edge(a, b)?;
            grid.set_edge(edge, true);
        }
        Ok(grid)
    }

    /// `width * height`, rejecting zero sizes and overflow
    pub fn checked_cell_count(width: usize, height: usize) -> Result<usize, GridError> {
        match width.checked_mul(height) {
            Some(count) if count > 0 => Ok(count),
            _ => Err(GridError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, id: CellId) -> bool {
        id.index() < self.cells.len()
    }

    /// Validates an externally supplied id
    pub fn check_cell(&self, id: CellId) -> Result<(), GridError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GridError::CellOutOfRange {
                id,
                cell_count: self.cell_count(),
            })
        }
    }

    /// Grid position `(x, y)` of a cell id
    pub fn position(&self, id: CellId) -> (usize, usize) {
        (id.index() % self.width, id.index() / self.width)
    }

    pub fn id_at(&self, x: usize, y: usize) -> Option<CellId> {
        (x < self.width && y < self.height).then(|| CellId::new(y * self.width + x))
    }

    /// Fetches a cell by id.
    ///
    /// # Panics
    ///
    /// Panics if the id is out of range or the stored cell disagrees with
    /// the row-major indexing scheme. Either case is a logic defect.
    pub fn cell(&self, id: CellId) -> &Cell {
        let cell = self
            .cells
            .get(id.index())
            .unwrap_or_else(|| panic!("cell {} outside {}x{} grid", id, self.width, self.height));
        assert_eq!(cell.id(), id, "cell index mismatch");
        cell
    }

    fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        let (width, height) = (self.width, self.height);
        let cell = self
            .cells
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("cell {} outside {}x{} grid", id, width, height));
        assert_eq!(cell.id(), id, "cell index mismatch");
        cell
    }

    pub fn kind(&self, id: CellId) -> CellType {
        self.cell(id).kind()
    }

    pub(crate) fn set_kind(&mut self, id: CellId, kind: CellType) {
        self.cell_mut(id).set_kind(kind);
    }

    /// Neighbor in one direction, if it lies inside the grid
    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        let (x, y) = self.position(id);
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.id_at(nx, ny)
    }

    /// In-bounds 4-neighbors in left, right, up, down order
    pub fn adjacent(&self, id: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(id, direction).map(|n| (direction, n)))
    }

    /// Neighbors reachable over an enabled edge, in left, right, up, down order
    pub fn linked_neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let cell = self.cell(id);
        self.adjacent(id)
            .filter(move |(direction, _)| cell.is_linked(*direction))
            .map(|(_, neighbor)| neighbor)
    }

    pub fn direction_between(&self, from: CellId, to: CellId) -> Option<Direction> {
        self.adjacent(from)
            .find(|(_, neighbor)| *neighbor == to)
            .map(|(direction, _)| direction)
    }

    /// Builds the canonical key for a pair of adjacent cells
    pub fn edge(&self, a: CellId, b: CellId) -> Result<EdgeKey, GridError> {
        if !self.contains(a) || !self.contains(b) || self.direction_between(a, b).is_none() {
            return Err(GridError::InvalidEdge { a, b });
        }
        Ok(if a < b { EdgeKey(a, b) } else { EdgeKey(b, a) })
    }

    pub fn is_edge_enabled(&self, edge: EdgeKey) -> bool {
        match self.direction_between(edge.low(), edge.high()) {
            Some(direction) => self.cell(edge.low()).is_linked(direction),
            None => false,
        }
    }

    /// Sets enablement on both endpoints of an edge
    pub(crate) fn set_edge(&mut self, edge: EdgeKey, enabled: bool) {
        let Some(direction) = self.direction_between(edge.low(), edge.high()) else {
            return;
        };
        self.cell_mut(edge.low()).set_link(direction, enabled);
        self.cell_mut(edge.high()).set_link(direction.opposite(), enabled);
    }

    /// All enabled edges, sorted by (low, high)
    pub fn edges(&self) -> Vec<EdgeKey> {
        let mut edges = Vec::new();
        for cell in &self.cells {
            for direction in [Direction::Right, Direction::Down] {
                if !cell.is_linked(direction) {
                    continue;
                }
                if let Some(neighbor) = self.neighbor(cell.id(), direction) {
                    edges.push(EdgeKey(cell.id(), neighbor));
                }
            }
        }
        edges.sort();
        edges
    }

    /// Ids of every non-Empty cell, ascending
    pub fn occupied(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().filter(|c| !c.is_empty()).map(|c| c.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> CellId {
        CellId::new(i)
    }

    #[test]
    fn test_new_grid_assigns_row_major_ids() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.cell_count(), 12);
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.id(), id(i));
            assert!(cell.is_empty());
        }
        assert_eq!(grid.position(id(6)), (2, 1));
        assert_eq!(grid.id_at(3, 2), Some(id(11)));
        assert_eq!(grid.id_at(4, 0), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
        // The cell count is compared before the grid is allocated
        assert_eq!(
            Grid::from_parts(1_000_000, 1_000_000, &[], &[]),
            Err(GridError::CellCountMismatch {
                expected: 1_000_000_000_000,
                actual: 0
            })
        );
        assert!(Grid::from_parts(usize::MAX, usize::MAX, &[], &[]).is_err());
    }

    #[test]
    fn test_adjacent_filters_out_of_bounds() {
        let grid = Grid::new(3, 3).unwrap();
        let corner: Vec<_> = grid.adjacent(id(0)).collect();
        assert_eq!(corner, vec![(Direction::Right, id(1)), (Direction::Down, id(3))]);

        let center: Vec<_> = grid.adjacent(id(4)).map(|(_, n)| n).collect();
        assert_eq!(center, vec![id(3), id(5), id(1), id(7)]);
    }

    #[test]
    fn test_row_ends_do_not_wrap() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.neighbor(id(2), Direction::Right), None);
        assert_eq!(grid.neighbor(id(3), Direction::Left), None);
        assert!(grid.edge(id(2), id(3)).is_err());
    }

    #[test]
    fn test_edge_key_is_canonical() {
        let grid = Grid::new(3, 3).unwrap();
        let forward = grid.edge(id(1), id(4)).unwrap();
        let backward = grid.edge(id(4), id(1)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.low(), id(1));
        assert_eq!(forward.high(), id(4));
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.edge(id(0), id(4)),
            Err(GridError::InvalidEdge { a: id(0), b: id(4) })
        );
        assert!(grid.edge(id(8), id(9)).is_err());
        assert!(grid.edge(id(2), id(2)).is_err());
    }

    #[test]
    fn test_set_edge_is_symmetric() {
        let mut grid = Grid::new(3, 3).unwrap();
        let edge = grid.edge(id(4), id(5)).unwrap();
        grid.set_edge(edge, true);
        assert!(grid.cell(id(4)).is_linked(Direction::Right));
        assert!(grid.cell(id(5)).is_linked(Direction::Left));
        assert_eq!(grid.linked_neighbors(id(5)).collect::<Vec<_>>(), vec![id(4)]);
        assert_eq!(grid.edges(), vec![edge]);

        grid.set_edge(edge, false);
        assert!(!grid.is_edge_enabled(edge));
        assert!(grid.edges().is_empty());
    }

    #[test]
    fn test_from_parts_validates() {
        let kinds = vec![CellType::Soft; 4];
        let grid = Grid::from_parts(2, 2, &kinds, &[(id(0), id(1)), (id(3), id(1))]).unwrap();
        assert_eq!(grid.edges().len(), 2);
        assert_eq!(grid.kind(id(3)), CellType::Soft);

        assert_eq!(
            Grid::from_parts(2, 2, &kinds[..3], &[]),
            Err(GridError::CellCountMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(Grid::from_parts(2, 2, &kinds, &[(id(0), id(3))]).is_err());
        assert!(Grid::from_parts(2, 2, &kinds, &[(id(0), id(9))]).is_err());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_cell_lookup_fails_fast() {
        let grid = Grid::new(2, 2).unwrap();
        grid.cell(id(4));
    }
}
