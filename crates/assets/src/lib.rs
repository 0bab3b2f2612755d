//! Block textures: which image file belongs to which block id, and the
//! table of loaded textures the renderer draws from.
//!
//! Renderers look textures up by block id through `TextureProvider`, never by
//! file path. A block without a loaded texture is drawn as an empty cell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use tilecraft_common::{BlockId, PLACEABLE_BLOCKS};

/// File name of the optional catalog inside the texture directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "block {0} is outside the placeable range {min}..={max}",
        min = PLACEABLE_BLOCKS.start(),
        max = PLACEABLE_BLOCKS.end()
    )]
    NotPlaceable(BlockId),
}

/// Capability: resolve a block id to a loaded texture handle.
pub trait TextureProvider {
    type Handle;

    /// The texture for `block`, or `None` if it has none.
    fn resolve(&self, block: BlockId) -> Option<&Self::Handle>;
}

/// Maps placeable block ids to image file names relative to the texture
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureCatalog {
    textures: BTreeMap<BlockId, String>,
}

impl Default for TextureCatalog {
    fn default() -> Self {
        let mut textures = BTreeMap::new();
        textures.insert(BlockId(1), "grass.png".to_string());
        textures.insert(BlockId(2), "stone.png".to_string());
        Self { textures }
    }
}

impl TextureCatalog {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self {
            textures: BTreeMap::new(),
        }
    }

    /// Bind `block` to an image file. Only placeable ids are accepted.
    pub fn register(&mut self, block: BlockId, file: impl Into<String>) -> Result<(), AssetError> {
        if !block.is_placeable() {
            return Err(AssetError::NotPlaceable(block));
        }
        self.textures.insert(block, file.into());
        Ok(())
    }

    pub fn get(&self, block: BlockId) -> Option<&str> {
        self.textures.get(&block).map(String::as_str)
    }

    /// Entries in block id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &str)> {
        self.textures.iter().map(|(b, f)| (*b, f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Save the catalog as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a catalog from JSON, rejecting ids outside the placeable range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let catalog: Self = serde_json::from_reader(file)?;
        if let Some(bad) = catalog.textures.keys().find(|b| !b.is_placeable()) {
            return Err(AssetError::NotPlaceable(*bad));
        }
        Ok(catalog)
    }

    /// The catalog in `dir`, or the built-in one if there is none or it is
    /// unusable.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(CATALOG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring texture catalog: {e}");
                Self::default()
            }
        }
    }
}

/// Loaded textures keyed by block id.
#[derive(Debug, Clone)]
pub struct TextureTable<H> {
    textures: BTreeMap<BlockId, H>,
}

impl<H> Default for TextureTable<H> {
    fn default() -> Self {
        Self {
            textures: BTreeMap::new(),
        }
    }
}

impl<H> TextureTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every catalog entry from `dir` with `loader`.
    ///
    /// A texture that fails to load is logged and left out of the table, so
    /// its block renders as an empty cell.
    pub fn load<E, F>(catalog: &TextureCatalog, dir: impl AsRef<Path>, mut loader: F) -> Self
    where
        E: Display,
        F: FnMut(&Path) -> Result<H, E>,
    {
        let dir = dir.as_ref();
        let mut table = Self::new();
        for (block, file) in catalog.iter() {
            let path = dir.join(file);
            match loader(&path) {
                Ok(handle) => {
                    table.textures.insert(block, handle);
                }
                Err(e) => {
                    tracing::error!(%block, path = %path.display(), "unable to load texture: {e}");
                }
            }
        }
        tracing::info!(
            loaded = table.len(),
            catalog = catalog.len(),
            "block textures ready"
        );
        table
    }

    pub fn insert(&mut self, block: BlockId, handle: H) {
        self.textures.insert(block, handle);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl<H> TextureProvider for TextureTable<H> {
    type Handle = H;

    fn resolve(&self, block: BlockId) -> Option<&H> {
        self.textures.get(&block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_grass_and_stone() {
        let catalog = TextureCatalog::default();
        assert_eq!(catalog.get(BlockId(1)), Some("grass.png"));
        assert_eq!(catalog.get(BlockId(2)), Some("stone.png"));
        assert_eq!(catalog.get(BlockId(3)), None);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn register_rejects_unplaceable_ids() {
        let mut catalog = TextureCatalog::empty();
        assert!(matches!(
            catalog.register(BlockId(0), "air.png"),
            Err(AssetError::NotPlaceable(BlockId(0)))
        ));
        assert!(catalog.register(BlockId(10), "x.png").is_err());
        catalog.register(BlockId(9), "gold.png").unwrap();
        assert_eq!(catalog.get(BlockId(9)), Some("gold.png"));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CATALOG_FILE);
        let mut catalog = TextureCatalog::default();
        catalog.register(BlockId(5), "sand.png").unwrap();
        catalog.save(&path).unwrap();

        let loaded = TextureCatalog::load(&path).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(TextureCatalog::load_or_default(tmp.path()), catalog);
    }

    #[test]
    fn load_rejects_out_of_range_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CATALOG_FILE);
        std::fs::write(&path, r#"{"textures": {"12": "x.png"}}"#).unwrap();
        assert!(matches!(
            TextureCatalog::load(&path),
            Err(AssetError::NotPlaceable(BlockId(12)))
        ));
        assert_eq!(
            TextureCatalog::load_or_default(tmp.path()),
            TextureCatalog::default()
        );
    }

    #[test]
    fn missing_catalog_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(
            TextureCatalog::load_or_default(tmp.path()),
            TextureCatalog::default()
        );
    }

    #[test]
    fn failed_textures_are_absent() {
        let catalog = TextureCatalog::default();
        let table = TextureTable::load(&catalog, "textures", |path: &Path| {
            if path.ends_with("stone.png") {
                Err("decode failed")
            } else {
                Ok(path.to_path_buf())
            }
        });
        assert_eq!(table.len(), 1);
        assert!(table.resolve(BlockId(1)).unwrap().ends_with("grass.png"));
        assert!(table.resolve(BlockId(2)).is_none());
        assert!(table.resolve(BlockId(7)).is_none());
    }
}
