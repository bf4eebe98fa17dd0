use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use macroquad::prelude::*;

use crate::document::{Layer, MapDocument, TileLayer};
use crate::geometry::TrianglesData;
use crate::loader::json_loader::decode_map_file;
use crate::resources::walk::walk_layers;
use crate::resources::Resources;

/// A Tiled JSON map together with the resources it references.
pub struct TiledMap {
    /// The parsed map.
    pub document: MapDocument,
    /// Images and atlas entries loaded for the map.
    pub resources: Resources,
}

impl TiledMap {
    /// Reads the map at `path` and loads its images relative to the map's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let (document, base) = decode_map_file(path)
            .with_context(|| format!("Decoding map file {}", path.display()))?;
        let resources = Resources::load(&document, &base)
            .with_context(|| format!("Loading resources for {}", path.display()))?;
        Ok(Self {
            document,
            resources,
        })
    }

    /// Tile layers in draw order, groups flattened depth-first.
    pub fn tile_layers(&self) -> Vec<&TileLayer> {
        let mut out = Vec::new();
        let walked: Result<(), std::convert::Infallible> =
            walk_layers(&self.document.layers, &mut |layer| {
                if let Layer::Tiles(tiles) = layer {
                    out.push(tiles);
                }
                Ok(())
            });
        match walked {
            Ok(()) => out,
            Err(never) => match never {},
        }
    }

    /// Batches every tile layer using the map's tile size as the cell size.
    pub fn batch_layers(&self, color: Color) -> Vec<HashMap<PathBuf, TrianglesData>> {
        let cell = vec2(
            self.document.tile_width as f32,
            self.document.tile_height as f32,
        );
        self.tile_layers()
            .into_iter()
            .map(|layer| self.resources.batch_tile_layer(layer, cell, color))
            .collect()
    }
}
