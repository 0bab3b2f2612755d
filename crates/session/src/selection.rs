use tilecraft_common::{BlockId, PLACEABLE_BLOCKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error(
        "block {0} is not placeable (expected {min}..={max})",
        min = PLACEABLE_BLOCKS.start(),
        max = PLACEABLE_BLOCKS.end()
    )]
    NotPlaceable(BlockId),
}

/// The block the player will place next. Starts at block 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection(BlockId);

impl Default for Selection {
    fn default() -> Self {
        Self(BlockId(*PLACEABLE_BLOCKS.start()))
    }
}

impl Selection {
    pub fn block(&self) -> BlockId {
        self.0
    }

    /// Select `block`. Ids outside the placeable catalog leave the selection as is.
    pub fn set(&mut self, block: BlockId) -> Result<(), SelectionError> {
        if !block.is_placeable() {
            return Err(SelectionError::NotPlaceable(block));
        }
        self.0 = block;
        Ok(())
    }
}
