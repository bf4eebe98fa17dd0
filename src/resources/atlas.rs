//! Slicing tileset images into per-gid frames.

use std::path::{Path, PathBuf};

use macroquad::math::Rect;
use tracing::trace;

use crate::document::Tileset;
use crate::error::{ResourceError, Result};
use crate::geometry::UnitQuad;
use crate::tile::GID_MASK;

/// Atlas record for one global tile id.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetEntry {
    base_geometry: UnitQuad,
    frame: Rect,
    first_gid: u32,
    image_key: PathBuf,
}

impl TilesetEntry {
    /// Template quad; clone it before transforming.
    pub fn base_geometry(&self) -> &UnitQuad {
        &self.base_geometry
    }

    /// Tile rectangle in image pixels, origin at the bottom-left.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// First gid of the tileset this tile belongs to.
    pub fn first_gid(&self) -> u32 {
        self.first_gid
    }

    /// Cache key of the tileset image.
    pub fn image_key(&self) -> &Path {
        &self.image_key
    }
}

/// Slices one tileset over an image of `image_width` x `image_height` pixels.
///
/// Returns `(gid, entry)` pairs in local id order. Nothing is returned unless
/// every tile fits inside the image and every gid is addressable by a
/// [`TileInstance`](crate::TileInstance).
pub fn build_tileset(
    tileset: &Tileset,
    image_key: &Path,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<(u32, TilesetEntry)>> {
    check_gid_range(tileset)?;
    let rows = grid_rows(tileset)?;
    let mut entries = Vec::with_capacity(tileset.tile_count as usize);

    for id in 0..tileset.tile_count {
        let frame = tile_frame(tileset, rows, id, image_width, image_height)?;
        trace!(tile = id, x = frame.x, y = frame.y, "tile frame");
        entries.push((
            tileset.first_gid + id,
            TilesetEntry {
                base_geometry: UnitQuad::new(frame),
                frame,
                first_gid: tileset.first_gid,
                image_key: image_key.to_path_buf(),
            },
        ));
    }
    Ok(entries)
}

// gid 0 marks an empty cell and the top bits carry flip flags, so the
// whole range must fit in 1..=GID_MASK.
fn check_gid_range(tileset: &Tileset) -> Result<()> {
    let end = tileset.first_gid.checked_add(tileset.tile_count);
    match end {
        Some(end) if tileset.first_gid > 0 && end <= GID_MASK + 1 => Ok(()),
        _ => Err(ResourceError::GidRange {
            first_gid: tileset.first_gid,
            tile_count: tileset.tile_count,
        }),
    }
}

fn grid_rows(tileset: &Tileset) -> Result<u32> {
    if tileset.columns == 0 || tileset.tile_count % tileset.columns != 0 {
        return Err(ResourceError::UnevenTileset {
            first_gid: tileset.first_gid,
            tile_count: tileset.tile_count,
            columns: tileset.columns,
        });
    }
    Ok(tileset.tile_count / tileset.columns)
}

// Tiled counts rows downwards from the top-left corner, frames are Y-up from
// the bottom-left, so the row index is flipped.
fn tile_frame(tileset: &Tileset, rows: u32, id: u32, image_width: u32, image_height: u32) -> Result<Rect> {
    let row = u64::from(rows - 1 - id / tileset.columns);
    let col = u64::from(id % tileset.columns);
    let (tw, th) = (u64::from(tileset.tile_width), u64::from(tileset.tile_height));
    let margin = u64::from(tileset.margin);
    let spacing = u64::from(tileset.spacing);

    let min_x = margin + col * (tw + spacing);
    let min_y = margin + row * (th + spacing);
    let max_x = min_x + tw;
    let max_y = min_y + th;

    if max_x > u64::from(image_width) || max_y > u64::from(image_height) {
        return Err(ResourceError::Bounds {
            tile_id: id,
            min_x: min_x as f32,
            min_y: min_y as f32,
            max_x: max_x as f32,
            max_y: max_y as f32,
        });
    }
    Ok(Rect::new(min_x as f32, min_y as f32, tw as f32, th as f32))
}
