use tilecraft_common::{BlockId, CellCoord};

/// Errors from grid access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds { cell: CellCoord, size: u32 },
}

/// The authoritative tile grid: a square N×N matrix of block ids.
///
/// Stored row-major in a single `Vec`. The dimension is fixed at construction
/// and never changes; every read and write is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    size: u32,
    cells: Vec<BlockId>,
}

impl WorldGrid {
    /// Create an all-empty grid of `size` × `size` cells.
    pub fn new(size: u32) -> Self {
        let n = size as usize;
        Self {
            size,
            cells: vec![BlockId::EMPTY; n * n],
        }
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether `cell` lies inside `[0, size)` on both axes.
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// Read the block at `cell`.
    pub fn get(&self, cell: CellCoord) -> Result<BlockId, GridError> {
        self.index(cell)
            .map(|i| self.cells[i])
            .ok_or(GridError::OutOfBounds {
                cell,
                size: self.size,
            })
    }

    /// Overwrite the block at `cell`, returning what was there before.
    ///
    /// Out-of-range writes leave the grid untouched.
    pub fn set(&mut self, cell: CellCoord, block: BlockId) -> Result<BlockId, GridError> {
        let Some(i) = self.index(cell) else {
            return Err(GridError::OutOfBounds {
                cell,
                size: self.size,
            });
        };
        Ok(std::mem::replace(&mut self.cells[i], block))
    }

    /// One row of the grid, `y` counted from the top.
    pub fn row(&self, y: u32) -> Option<&[BlockId]> {
        self.rows().nth(y as usize)
    }

    /// All rows in top-to-bottom order.
    pub fn rows(&self) -> impl Iterator<Item = &[BlockId]> {
        self.cells.chunks(self.size.max(1) as usize)
    }

    /// Every cell with its coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, BlockId)> + '_ {
        let n = self.size.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, block)| {
            (CellCoord::new((i % n) as i32, (i / n) as i32), *block)
        })
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|b| !b.is_empty()).count()
    }

    /// Deterministic FNV-1a hash of the grid dimension and contents.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.size.to_le_bytes());
        for block in &self.cells {
            mix(&block.0.to_le_bytes());
        }
        h
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let x = u32::try_from(cell.x).ok()?;
        let y = u32::try_from(cell.y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y as usize * self.size as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let g = WorldGrid::new(10);
        assert_eq!(g.size(), 10);
        assert_eq!(g.filled_count(), 0);
        assert_eq!(g.iter().count(), 100);
        assert!(g.iter().all(|(_, b)| b.is_empty()));
    }

    #[test]
    fn set_returns_previous_and_overwrites() {
        let mut g = WorldGrid::new(10);
        let c = CellCoord::new(3, 4);
        assert_eq!(g.set(c, BlockId(7)), Ok(BlockId::EMPTY));
        assert_eq!(g.set(c, BlockId(3)), Ok(BlockId(7)));
        assert_eq!(g.get(c), Ok(BlockId(3)));
        assert_eq!(g.filled_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_rejected_without_wrapping() {
        let mut g = WorldGrid::new(10);
        let before = g.clone();
        for cell in [
            CellCoord::new(-1, 5),
            CellCoord::new(10, 5),
            CellCoord::new(5, -1),
            CellCoord::new(5, 10),
            CellCoord::new(i32::MIN, i32::MAX),
        ] {
            assert_eq!(
                g.set(cell, BlockId(1)),
                Err(GridError::OutOfBounds { cell, size: 10 })
            );
            assert!(g.get(cell).is_err());
            assert!(!g.contains(cell));
        }
        assert_eq!(g, before);
    }

    #[test]
    fn row_major_layout() {
        let mut g = WorldGrid::new(3);
        g.set(CellCoord::new(2, 0), BlockId(1)).unwrap();
        g.set(CellCoord::new(0, 1), BlockId(2)).unwrap();
        assert_eq!(g.row(0).unwrap(), &[BlockId(0), BlockId(0), BlockId(1)]);
        assert_eq!(g.row(1).unwrap(), &[BlockId(2), BlockId(0), BlockId(0)]);
        assert!(g.row(3).is_none());
        let (cell, block) = g.iter().nth(5).unwrap();
        assert_eq!(cell, CellCoord::new(2, 1));
        assert_eq!(block, BlockId::EMPTY);
    }

    #[test]
    fn state_hash_tracks_contents() {
        let mut a = WorldGrid::new(4);
        let b = WorldGrid::new(4);
        assert_eq!(a.state_hash(), b.state_hash());
        a.set(CellCoord::new(1, 1), BlockId(2)).unwrap();
        assert_ne!(a.state_hash(), b.state_hash());
        assert_ne!(WorldGrid::new(4).state_hash(), WorldGrid::new(5).state_hash());
    }
}
