use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use std::path::Path;
use tilecraft_assets::{TextureCatalog, TextureTable};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode an image file and upload it as an egui texture.
///
/// Textures are sampled with nearest filtering so small tile art stays sharp
/// when stretched over a cell.
pub fn load_texture(ctx: &Context, path: &Path) -> Result<TextureHandle, TextureError> {
    let rgba = image::open(path)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let name = path.display().to_string();
    tracing::debug!(%name, width = size[0], height = size[1], "uploading texture");
    Ok(ctx.load_texture(name, pixels, TextureOptions::NEAREST))
}

/// Load every texture in `catalog` from `dir`.
pub fn load_block_textures(
    ctx: &Context,
    catalog: &TextureCatalog,
    dir: impl AsRef<Path>,
) -> TextureTable<TextureHandle> {
    TextureTable::load(catalog, dir, |path| load_texture(ctx, path))
}
