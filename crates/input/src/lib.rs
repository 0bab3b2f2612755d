//! Input: raw events from the windowing layer, classified into actions.
//!
//! # Invariants
//! - The session consumes `Action`s, never raw events.
//! - Classification is total and side-effect free.
//! - Raw key and button shapes are interpreted only in this crate.

pub mod action;
pub mod dispatch;
pub mod event;

pub use action::Action;
pub use dispatch::classify;
pub use event::{EventQueue, EventSource, Key, PointerButton, RawEvent};
