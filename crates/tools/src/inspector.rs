use std::collections::BTreeMap;
use std::fmt;
use tilecraft_common::{BlockId, CellCoord};
use tilecraft_kernel::WorldGrid;

/// Grid inspector for the CLI and debugging.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the grid.
    pub fn summary(grid: &WorldGrid) -> GridSummary {
        let mut counts = BTreeMap::new();
        for (_, block) in grid.iter().filter(|(_, b)| !b.is_empty()) {
            *counts.entry(block).or_insert(0) += 1;
        }
        GridSummary {
            size: grid.size(),
            filled: grid.filled_count(),
            counts,
            state_hash: grid.state_hash(),
        }
    }

    /// Contents of one cell, or `None` outside the grid.
    pub fn inspect_cell(grid: &WorldGrid, cell: CellCoord) -> Option<CellInfo> {
        grid.get(cell).ok().map(|block| CellInfo { cell, block })
    }

    /// Every non-empty cell in row-major order.
    pub fn list_filled(grid: &WorldGrid) -> Vec<CellInfo> {
        grid.iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(cell, block)| CellInfo { cell, block })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSummary {
    pub size: u32,
    pub filled: usize,
    /// Cell count per non-empty block id.
    pub counts: BTreeMap<BlockId, usize>,
    pub state_hash: u64,
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid: {size}x{size} filled={} hash={:016x}",
            self.filled,
            self.state_hash,
            size = self.size,
        )?;
        for (block, count) in &self.counts {
            write!(f, "\n  block {block}: {count}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    pub cell: CellCoord,
    pub block: BlockId,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} = {}", self.cell, self.block)
    }
}
