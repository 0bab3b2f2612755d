//! Persistence: the grid is stored as a single JSON snapshot, a row-major
//! array of N arrays of N integers.
//!
//! # Invariants
//! - Loading never fails the caller. Damage is recovered at the finest level
//!   possible (cell, then row, then whole file) and reported as `LoadIssue`s.
//! - Saving is deterministic: an unchanged grid produces identical bytes.
//! - `load(save(g)) == g` for every grid.
//!
//! Only whole snapshots are written, once per session. A failed save is
//! reported to the caller and the session's edits are lost; a process that
//! dies before the save loses them too.

mod snapshot;

pub use snapshot::{
    LoadIssue, Loaded, PersistError, decode, encode, load, load_report, save, snapshot_digest,
};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_WORLD_PATH: &str = "world.json";

/// Package name and version, as built.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
