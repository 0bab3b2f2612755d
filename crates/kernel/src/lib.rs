//! World Kernel: the tile grid, the player, and the rule that decides which
//! cells the player may edit.
//!
//! # Invariants
//! - Every grid access is bounds-checked; out-of-range requests are rejected,
//!   never wrapped.
//! - The player position stays within `[0, world_dim - cell_size]` on both axes.
//! - Placement is allowed only within `reach` cells on each axis independently.

pub mod grid;
pub mod placement;
pub mod player;

pub use grid::{GridError, WorldGrid};
pub use placement::{PlacementRejection, validate_placement};
pub use player::PlayerState;
