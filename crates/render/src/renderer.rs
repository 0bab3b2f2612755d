use glam::IVec2;
use std::fmt;
use tilecraft_common::{BlockId, CellCoord};

/// An axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A square of side `size` with its top-left corner at `origin`.
    pub fn square(origin: IVec2, size: i32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    /// The screen area covered by a grid cell.
    pub fn cell(cell: CellCoord, cell_size: i32) -> Self {
        Self::square(cell.origin_pixel(cell_size), cell_size)
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Grow by `by` pixels on every side.
    pub fn inflate(&self, by: i32) -> Self {
        Self::new(self.x - by, self.y - by, self.w + 2 * by, self.h + 2 * by)
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BACKGROUND: Rgba = Rgba([0x00, 0x00, 0x00, 0xFF]);
    pub const GRID: Rgba = Rgba([0x55, 0x55, 0x55, 0xFF]);
    pub const PLAYER: Rgba = Rgba([0xFF, 0x00, 0x00, 0xFF]);
    pub const INDICATOR: Rgba = Rgba([0x20, 0x20, 0x20, 0xFF]);
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Errors a backend can report when finishing a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("frame could not be presented: {0}")]
    Present(String),
}

/// Drawing capability supplied by a backend.
///
/// Every call is in world pixel coordinates. The backend decides how a texture
/// handle is turned into pixels; callers obtain handles from a
/// `TextureProvider` whose `Handle` is this renderer's `Texture`.
pub trait Renderer {
    type Texture;

    /// Start a new frame.
    fn clear_frame(&mut self);

    /// Outline one cell.
    fn draw_grid_lines(&mut self, rect: PixelRect);

    /// Draw `block`'s texture stretched over `rect`.
    fn draw_textured_cell(&mut self, texture: &Self::Texture, block: BlockId, rect: PixelRect);

    fn draw_filled_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Finish the frame.
    fn present(&mut self) -> Result<(), RenderError>;
}
