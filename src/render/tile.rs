use std::collections::HashMap;
use std::path::PathBuf;

use macroquad::prelude::*;

use crate::document::TileLayer;
use crate::geometry::{Triangles, TrianglesData};
use crate::render::flip::apply_flips;
use crate::resources::Resources;
use crate::tile::TileInstance;

impl Resources {
    /// Writes the geometry of `tile` centred on `target` into `out`.
    ///
    /// Returns `false` without touching `out` when the tile's gid has no atlas
    /// entry; empty cells are normal in sparse layers.
    pub fn render<T: Triangles + ?Sized>(
        &self,
        tile: TileInstance,
        target: Rect,
        color: Color,
        out: &mut T,
    ) -> bool {
        let Some(entry) = self.entry(tile.gid()) else {
            return false;
        };

        let mut quad = entry.base_geometry().clone();
        let vertices = quad.vertices_mut();
        apply_flips(tile.flips(), vertices);

        let center = target.center();
        for v in vertices.iter_mut() {
            v.position += center;
            v.color = color;
        }
        out.update(&vertices[..]);
        true
    }

    /// Renders every non-empty cell of `layer` and batches the triangles by
    /// source image.
    ///
    /// Cell `(0, 0)` is the top-left of the layer, so it lands on the highest
    /// row of the Y-up output.
    pub fn batch_tile_layer(
        &self,
        layer: &TileLayer,
        cell_size: Vec2,
        color: Color,
    ) -> HashMap<PathBuf, TrianglesData> {
        let mut batches: HashMap<PathBuf, TrianglesData> = HashMap::new();
        let mut scratch = TrianglesData::new();

        for (col, row, tile) in layer.instances() {
            let Some(entry) = self.entry(tile.gid()) else {
                continue;
            };
            let flipped_row = layer.height.saturating_sub(row + 1);
            let target = Rect::new(
                col as f32 * cell_size.x,
                flipped_row as f32 * cell_size.y,
                cell_size.x,
                cell_size.y,
            );
            if self.render(tile, target, color, &mut scratch) {
                batches
                    .entry(entry.image_key().to_path_buf())
                    .or_default()
                    .append(&scratch);
            }
        }
        batches
    }
}
