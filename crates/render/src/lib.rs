//! Rendering Adapter: renderer-agnostic frame composition.
//!
//! # Invariants
//! - Renderers never mutate session state; they receive a read-only `FrameView`.
//! - A block without a texture is drawn as an empty cell, never an error.
//!
//! `draw_frame` decides what is drawn and in which order; a `Renderer` only
//! knows how to draw rectangles and textures.

mod frame;
mod renderer;
mod text;

pub use frame::{FrameView, draw_frame, indicator_rect};
pub use renderer::{PixelRect, RenderError, Renderer, Rgba};
pub use text::TextRenderer;

/// Package name and version, as built.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
