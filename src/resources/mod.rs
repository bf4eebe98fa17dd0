//! Images and tile atlas referenced by a map document.

pub mod atlas;
pub mod images;
pub mod walk;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::texture::Image;
use tracing::{debug, info};

use crate::document::{Layer, MapDocument};
use crate::error::{ResourceError, Result};

pub use atlas::TilesetEntry;
pub use images::ImageCache;

/// Everything needed to draw a map's tiles and images: the decoded images and
/// one atlas entry per global tile id.
///
/// Built once by [`Resources::load`] and read-only afterwards.
pub struct Resources {
    base_path: PathBuf,
    entries: HashMap<u32, TilesetEntry>,
    images: ImageCache,
}

impl Resources {
    /// Loads every tileset image and image layer of `map`.
    ///
    /// Relative image paths are resolved against `path`; an empty path means
    /// the current directory. Any failure aborts the whole load.
    pub fn load(map: &MapDocument, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let base_path = if path.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            path.to_path_buf()
        };
        let mut resources = Resources {
            base_path,
            entries: HashMap::new(),
            images: ImageCache::new(),
        };

        for set in &map.tilesets {
            let key = resources.images.load(&resources.base_path, &set.image)?;
            let (width, height) = resources
                .images
                .get(&key)
                .map(|img| (u32::from(img.width), u32::from(img.height)))
                .unwrap_or_default();
            let entries = atlas::build_tileset(set, &key, width, height)?;
            info!(
                first_gid = set.first_gid,
                tiles = entries.len(),
                image = %key.display(),
                "built tileset atlas"
            );
            resources.entries.extend(entries);
        }

        for layer in &map.layers {
            resources
                .load_layer(layer)
                .map_err(|err| ResourceError::LoadLayers {
                    source: Box::new(err),
                })?;
        }

        info!(
            tiles = resources.entries.len(),
            images = resources.images.len(),
            "map resources loaded"
        );
        Ok(resources)
    }

    fn load_layer(&mut self, layer: &Layer) -> Result<()> {
        walk::walk_layer(layer, &mut |layer: &Layer| {
            if let Layer::Image(image_layer) = layer {
                if let Some(source) = image_layer.image() {
                    debug!(layer = %image_layer.name, source, "loading image layer");
                    self.images.load(&self.base_path, source)?;
                }
            }
            Ok(())
        })
    }

    /// Directory relative image paths were resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Atlas entry for a clean global tile id.
    pub fn entry(&self, gid: u32) -> Option<&TilesetEntry> {
        self.entries.get(&gid)
    }

    /// Every atlas entry keyed by global tile id.
    pub fn entries(&self) -> &HashMap<u32, TilesetEntry> {
        &self.entries
    }

    /// Every decoded image of the map.
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Decoded image for a key returned by the cache or stored in an entry.
    pub fn image(&self, key: &Path) -> Option<&Image> {
        self.images.get(key)
    }
}
