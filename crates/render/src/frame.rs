use crate::renderer::{PixelRect, RenderError, Renderer, Rgba};
use tilecraft_assets::TextureProvider;
use tilecraft_common::{BlockId, WorldConfig};
use tilecraft_kernel::{PlayerState, WorldGrid};

/// Margin between the selection indicator and the bottom-left window corner.
const INDICATOR_MARGIN: i32 = 10;

/// Read-only state needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub config: &'a WorldConfig,
    pub grid: &'a WorldGrid,
    pub player: &'a PlayerState,
    pub selection: BlockId,
}

impl<'a> FrameView<'a> {
    pub fn new(
        config: &'a WorldConfig,
        grid: &'a WorldGrid,
        player: &'a PlayerState,
        selection: BlockId,
    ) -> Self {
        Self {
            config,
            grid,
            player,
            selection,
        }
    }
}

/// Where the selected block is shown: one cell-sized square in the
/// bottom-left corner.
pub fn indicator_rect(config: &WorldConfig) -> PixelRect {
    let size = config.cell_size();
    PixelRect::new(
        INDICATOR_MARGIN,
        config.world_dim() as i32 - size - INDICATOR_MARGIN,
        size,
        size,
    )
}

/// Draw one full frame, back to front: cells, selection indicator, player.
pub fn draw_frame<R, T>(
    renderer: &mut R,
    textures: &T,
    view: &FrameView<'_>,
) -> Result<(), RenderError>
where
    R: Renderer,
    T: TextureProvider<Handle = R::Texture>,
{
    let cell_size = view.config.cell_size();
    renderer.clear_frame();

    for (cell, block) in view.grid.iter() {
        let rect = PixelRect::cell(cell, cell_size);
        let texture = if block.is_empty() {
            None
        } else {
            textures.resolve(block)
        };
        match texture {
            Some(texture) => renderer.draw_textured_cell(texture, block, rect),
            None => renderer.draw_grid_lines(rect),
        }
    }

    let indicator = indicator_rect(view.config);
    renderer.draw_filled_rect(indicator.inflate(2), Rgba::INDICATOR);
    if let Some(texture) = textures.resolve(view.selection) {
        renderer.draw_textured_cell(texture, view.selection, indicator);
    }

    renderer.draw_filled_rect(
        PixelRect::square(view.player.position(), view.player.size()),
        Rgba::PLAYER,
    );

    renderer.present()
}
