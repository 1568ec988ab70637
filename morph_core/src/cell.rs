//! Cell primitives: ids, material types and edge masks

use bitflags::bitflags;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable cell identifier (`y * width + x`)
///
/// Assigned once when the grid is allocated and never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(usize);

impl CellId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CellId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Material placed in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    #[default]
    Empty,
    Rigid,
    Soft,
    /// Horizontal actuator
    ActuatorH,
    /// Vertical actuator
    ActuatorV,
    Fixed,
}

impl CellType {
    pub const ALL: [CellType; 6] = [
        CellType::Empty,
        CellType::Rigid,
        CellType::Soft,
        CellType::ActuatorH,
        CellType::ActuatorV,
        CellType::Fixed,
    ];

    pub fn is_empty(self) -> bool {
        self == CellType::Empty
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Rigid => "rigid",
            CellType::Soft => "soft",
            CellType::ActuatorH => "actuator_h",
            CellType::ActuatorV => "actuator_v",
            CellType::Fixed => "fixed",
        }
    }

    /// Parses the serialized name of a cell type
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Single-character glyph used by text renderers
    pub fn glyph(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Rigid => 'R',
            CellType::Soft => 'S',
            CellType::ActuatorH => 'H',
            CellType::ActuatorV => 'V',
            CellType::Fixed => 'F',
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Candidate order used by every traversal: left, right, up, down.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn mask(self) -> EdgeMask {
        match self {
            Direction::Left => EdgeMask::LEFT,
            Direction::Right => EdgeMask::RIGHT,
            Direction::Up => EdgeMask::UP,
            Direction::Down => EdgeMask::DOWN,
        }
    }

    /// Offset as (dx, dy)
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

bitflags! {
    /// Enabled edges of a single cell, one bit per direction
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EdgeMask: u8 {
        const LEFT = 0b0001;
        const RIGHT = 0b0010;
        const UP = 0b0100;
        const DOWN = 0b1000;
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    kind: CellType,
    links: EdgeMask,
}

impl Cell {
    pub(crate) fn new(id: CellId) -> Self {
        Self {
            id,
            kind: CellType::Empty,
            links: EdgeMask::empty(),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn kind(&self) -> CellType {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Directions in which an edge is currently enabled
    pub fn links(&self) -> EdgeMask {
        self.links
    }

    pub fn is_linked(&self, direction: Direction) -> bool {
        self.links.contains(direction.mask())
    }

    pub(crate) fn set_kind(&mut self, kind: CellType) {
        self.kind = kind;
    }

    pub(crate) fn set_link(&mut self, direction: Direction, enabled: bool) {
        self.links.set(direction.mask(), enabled);
    }
}
