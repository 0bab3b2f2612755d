//! Session: owns the grid, the player and the current selection, and applies
//! actions to them in arrival order.
//!
//! # Invariants
//! - All session state is owned by the `Session` value; nothing is global.
//! - The grid changes only through approved placements.
//! - Actions are applied strictly in the order they arrive.

mod selection;
mod session;

pub use selection::{Selection, SelectionError};
pub use session::{ActionOutcome, LoopState, Rejection, Session, SessionError};
