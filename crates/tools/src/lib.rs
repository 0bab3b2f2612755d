//! Developer tooling: read-only queries over a world grid.
//!
//! # Invariants
//! - Tools never mutate the grid they inspect.

mod inspector;

pub use inspector::{CellInfo, GridSummary, WorldInspector};

/// Package name and version, as built.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
