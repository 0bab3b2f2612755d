use egui::{Color32, CornerRadius, Painter, Rect, Stroke, StrokeKind, TextureHandle, pos2, vec2};
use tilecraft_common::BlockId;
use tilecraft_render::{PixelRect, RenderError, Renderer, Rgba};

/// A `Renderer` that paints into one egui layer.
///
/// Shapes are only recorded here; they reach the screen when the application
/// tessellates and submits the egui output for the frame.
pub struct EguiCanvas {
    painter: Painter,
    shapes: usize,
}

impl EguiCanvas {
    pub fn new(painter: Painter) -> Self {
        Self { painter, shapes: 0 }
    }

    /// Shapes painted since the last `clear_frame`.
    pub fn shape_count(&self) -> usize {
        self.shapes
    }
}

fn to_rect(rect: PixelRect) -> Rect {
    Rect::from_min_size(
        pos2(rect.x as f32, rect.y as f32),
        vec2(rect.w as f32, rect.h as f32),
    )
}

fn to_color(color: Rgba) -> Color32 {
    let [r, g, b, a] = color.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Renderer for EguiCanvas {
    type Texture = TextureHandle;

    fn clear_frame(&mut self) {
        self.shapes = 0;
        self.painter.rect_filled(
            self.painter.clip_rect(),
            CornerRadius::ZERO,
            to_color(Rgba::BACKGROUND),
        );
    }

    fn draw_grid_lines(&mut self, rect: PixelRect) {
        self.painter.rect_stroke(
            to_rect(rect),
            CornerRadius::ZERO,
            Stroke::new(1.0, to_color(Rgba::GRID)),
            StrokeKind::Inside,
        );
        self.shapes += 1;
    }

    fn draw_textured_cell(&mut self, texture: &TextureHandle, _block: BlockId, rect: PixelRect) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter
            .image(texture.id(), to_rect(rect), uv, Color32::WHITE);
        self.shapes += 1;
    }

    fn draw_filled_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.painter
            .rect_filled(to_rect(rect), CornerRadius::ZERO, to_color(color));
        self.shapes += 1;
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
