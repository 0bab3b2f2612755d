//! Shared vocabulary for the tilecraft crates.
//!
//! # Invariants
//! - Block id 0 is the empty tile and is never placeable.
//! - Placeable ids are exactly `PLACEABLE_BLOCKS`; input, selection and the
//!   texture catalog all validate against the same range.

mod config;
mod types;

pub use config::{ConfigError, WorldConfig};
pub use types::{BlockId, CellCoord, Direction, PLACEABLE_BLOCKS};
