//! Tileset atlas and per-tile geometry for Tiled maps drawn with Macroquad.
//!
//! [`Resources::load`] decodes every image a [`MapDocument`] references and
//! slices each tileset into per-gid frames; [`Resources::render`] turns a
//! placed [`TileInstance`] into flipped, tinted triangles.

#![warn(missing_docs)]

mod document;
mod error;
mod geometry;
mod loader {
    pub mod json_loader;
}
mod map;
pub mod render;
pub mod resources;
mod tile;

pub use document::{GroupLayer, ImageLayer, Layer, MapDocument, TileLayer, Tileset};
pub use error::{ResourceError, Result};
pub use geometry::{TileVertex, Triangles, TrianglesData, UnitQuad, MAX_MESH_VERTICES};
pub use loader::json_loader::decode_map_file;
pub use map::TiledMap;
pub use resources::{ImageCache, Resources, TilesetEntry};
pub use tile::{FlipFlags, TileInstance, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
