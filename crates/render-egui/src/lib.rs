//! egui render backend for the tile world.
//!
//! `EguiCanvas` implements `Renderer` on top of an `egui::Painter`; world
//! pixels map 1:1 to egui points. Block textures are PNG files decoded with
//! `image` and uploaded as egui textures once at startup.
//!
//! # Invariants
//! - The canvas never mutates session state.
//! - A texture that fails to load leaves its block untextured.

mod canvas;
mod textures;

pub use canvas::EguiCanvas;
pub use textures::{TextureError, load_block_textures, load_texture};
