use crate::renderer::{PixelRect, RenderError, Renderer, Rgba};
use tilecraft_assets::{TextureCatalog, TextureTable};
use tilecraft_common::{BlockId, CellCoord, WorldConfig};

const EMPTY: char = '.';
const PLAYER: char = '@';

/// Text renderer for the CLI and for tests.
///
/// Cell-aligned draws land on a character map, one character per cell; the
/// player marker is shown as `@` on the cell under its corner. Anything else
/// (the selection indicator) is listed below the map.
#[derive(Debug)]
pub struct TextRenderer {
    cell_size: i32,
    size: usize,
    canvas: Vec<char>,
    overlays: Vec<String>,
    frame: String,
    frames: u64,
}

impl TextRenderer {
    pub fn new(config: &WorldConfig) -> Self {
        let size = config.grid_size() as usize;
        Self {
            cell_size: config.cell_size(),
            size,
            canvas: vec![' '; size * size],
            overlays: Vec::new(),
            frame: String::new(),
            frames: 0,
        }
    }

    /// Glyph textures for every block in `catalog`: the block's digit.
    pub fn textures(catalog: &TextureCatalog) -> TextureTable<char> {
        let mut table = TextureTable::new();
        for (block, _) in catalog.iter() {
            table.insert(block, glyph(block));
        }
        table
    }

    /// The last presented frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Canvas slot for a rect that covers exactly one grid cell.
    fn aligned_slot(&self, rect: PixelRect) -> Option<usize> {
        let cs = self.cell_size;
        if rect.w != cs || rect.h != cs || rect.x % cs != 0 || rect.y % cs != 0 {
            return None;
        }
        self.slot(CellCoord::from_pixel(rect.origin(), cs))
    }

    fn slot(&self, cell: CellCoord) -> Option<usize> {
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        (x < self.size && y < self.size).then_some(y * self.size + x)
    }
}

fn glyph(block: BlockId) -> char {
    char::from_digit(u32::from(block.0), 10).unwrap_or('#')
}

impl Renderer for TextRenderer {
    type Texture = char;

    fn clear_frame(&mut self) {
        self.canvas.fill(' ');
        self.overlays.clear();
    }

    fn draw_grid_lines(&mut self, rect: PixelRect) {
        match self.aligned_slot(rect) {
            Some(i) => self.canvas[i] = EMPTY,
            None => self.overlays.push(format!("grid at {rect}")),
        }
    }

    fn draw_textured_cell(&mut self, texture: &char, block: BlockId, rect: PixelRect) {
        match self.aligned_slot(rect) {
            Some(i) => self.canvas[i] = *texture,
            None => self
                .overlays
                .push(format!("block {block} '{texture}' at {rect}")),
        }
    }

    fn draw_filled_rect(&mut self, rect: PixelRect, color: Rgba) {
        if color == Rgba::PLAYER {
            if let Some(i) = self.slot(CellCoord::from_pixel(rect.origin(), self.cell_size)) {
                self.canvas[i] = PLAYER;
                return;
            }
        }
        self.overlays.push(format!("fill {color} at {rect}"));
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let mut out = String::with_capacity(self.canvas.len() + self.size);
        for row in self.canvas.chunks(self.size.max(1)) {
            out.extend(row);
            out.push('\n');
        }
        for line in &self.overlays {
            out.push_str(line);
            out.push('\n');
        }
        self.frame = out;
        self.frames += 1;
        Ok(())
    }
}
