use glam::IVec2;
use tilecraft_common::{BlockId, Direction};

/// A game-level action produced by the dispatcher and applied by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the frame loop.
    Quit,
    /// Change the current selection. Always a placeable id.
    SelectBlock(BlockId),
    /// Step the player one cell in a direction.
    Move(Direction),
    /// Place the selected block at the cell under this pixel.
    Place(IVec2),
}
