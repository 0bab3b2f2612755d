use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Block ids that can be selected and placed. Bound to the number keys 1-9.
pub const PLACEABLE_BLOCKS: RangeInclusive<u16> = 1..=9;

/// Block-type id stored in a grid cell. `BlockId::EMPTY` (0) is an empty tile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const EMPTY: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the id if it lies in `PLACEABLE_BLOCKS`.
    pub fn placeable(id: u16) -> Option<Self> {
        PLACEABLE_BLOCKS.contains(&id).then_some(Self(id))
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    pub fn is_placeable(self) -> bool {
        PLACEABLE_BLOCKS.contains(&self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell coordinate on the tile grid. Signed so that targets outside the
/// grid (e.g. a pointer left of the world) can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Map a pixel position onto the cell containing it: `floor(p / cell_size)`.
    pub fn from_pixel(pixel: IVec2, cell_size: i32) -> Self {
        assert!(cell_size > 0, "cell_size must be positive");
        Self {
            x: pixel.x.div_euclid(cell_size),
            y: pixel.y.div_euclid(cell_size),
        }
    }

    /// Per-axis absolute distance to `other`.
    pub fn axis_distance(self, other: CellCoord) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// Top-left pixel of this cell.
    pub fn origin_pixel(self, cell_size: i32) -> IVec2 {
        IVec2::new(self.x * cell_size, self.y * cell_size)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four movement directions. Screen space: +y points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset in pixel space.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}
