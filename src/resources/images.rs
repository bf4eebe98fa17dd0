//! Image decoding and the path-keyed image cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::texture::Image;
use normalize_path::NormalizePath;
use tracing::{debug, info};

use crate::error::{ResourceError, Result};

/// Decoded images keyed by their absolute, normalized path.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<PathBuf, Image>,
}

impl ImageCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `source` against `base`, decodes it unless an image for the
    /// same resolved path is already cached, and returns the cache key.
    pub fn load(&mut self, base: &Path, source: &str) -> Result<PathBuf> {
        let key = resolve_path(base, source)?;
        if self.images.contains_key(&key) {
            debug!(path = %key.display(), "image already cached");
            return Ok(key);
        }
        let image = decode_image(&key)?;
        info!(
            path = %key.display(),
            width = image.width,
            height = image.height,
            "loaded image"
        );
        self.images.insert(key.clone(), image);
        Ok(key)
    }

    /// Image cached under `key`.
    pub fn get(&self, key: &Path) -> Option<&Image> {
        self.images.get(key)
    }

    /// Whether an image is cached under `key`.
    pub fn contains(&self, key: &Path) -> bool {
        self.images.contains_key(key)
    }

    /// Resolved paths of every cached image.
    pub fn keys(&self) -> impl Iterator<Item = &Path> {
        self.images.keys().map(PathBuf::as_path)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Absolute sources are only cleaned; relative ones are joined to `base`
/// first. The result never depends on how `..` and `.` were spelled.
pub fn resolve_path(base: &Path, source: &str) -> Result<PathBuf> {
    let source = Path::new(source);
    let joined = if source.is_absolute() {
        source.to_path_buf()
    } else {
        base.join(source)
    };
    let absolute = std::path::absolute(&joined).map_err(|err| ResourceError::FileOpen {
        path: joined.clone(),
        source: err,
    })?;
    Ok(absolute.normalize())
}

fn decode_image(path: &Path) -> Result<Image> {
    let bytes = std::fs::read(path).map_err(|source| ResourceError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|source| ResourceError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    let (width, height) = rgba.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(ResourceError::ImageTooLarge {
            path: path.to_path_buf(),
            width,
            height,
        });
    };
    Ok(Image {
        bytes: rgba.into_raw(),
        width: w,
        height: h,
    })
}
