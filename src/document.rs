use serde::Deserialize;

use crate::tile::TileInstance;

/// Map document with every tileset resolved to its grid and image.
#[derive(Debug, Clone)]
pub struct MapDocument {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Cell width in pixels.
    pub tile_width: u32,
    /// Cell height in pixels.
    pub tile_height: u32,
    /// Tilesets, embedded or loaded from their own files.
    pub tilesets: Vec<Tileset>,
    /// Top-level layers in draw order.
    pub layers: Vec<Layer>,
}

/// One image atlas with a regular grid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tileset {
    /// Gid of the tileset's first tile.
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    /// Image path, relative to the map's directory unless absolute.
    pub image: String,
    /// Number of tiles, a multiple of `columns`.
    #[serde(rename = "tilecount")]
    pub tile_count: u32,
    /// Tiles per image row.
    pub columns: u32,
    /// Tile width in pixels.
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    /// Tile height in pixels.
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    /// Pixels around the whole grid.
    #[serde(default)]
    pub margin: u32, // 0 if not used
    /// Pixels between neighbouring tiles.
    #[serde(default)]
    pub spacing: u32, // 0 if not used
}

/// A node of the map's content tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    /// Grid of placed tiles.
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    /// A single standalone image.
    #[serde(rename = "imagelayer")]
    Image(ImageLayer),
    /// Folder of child layers.
    #[serde(rename = "group")]
    Group(GroupLayer),
    /// Object groups and anything newer than this loader understands.
    #[serde(other)]
    Unsupported,
}

/// Layer of placed tiles, stored row-major from the top-left cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileLayer {
    /// Name given in the editor.
    #[serde(default)]
    pub name: String,
    /// Width in cells.
    pub width: usize,
    /// Height in cells.
    pub height: usize,
    /// One entry per cell, `width * height` of them.
    #[serde(default)]
    pub data: Vec<TileInstance>, // raw GIDs, flip flags included
}

impl TileLayer {
    /// Cells in row-major order as `(col, row, tile)`, empty cells included.
    pub fn instances(&self) -> impl Iterator<Item = (usize, usize, TileInstance)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, tile)| (idx % width, idx / width, *tile))
    }
}

/// Layer showing one image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageLayer {
    /// Name given in the editor.
    #[serde(default)]
    pub name: String,
    /// Image path as written in the map; see [`ImageLayer::image`].
    #[serde(default)]
    pub image: String,
}

impl ImageLayer {
    /// Tiled writes an empty string for image layers without a picture.
    pub fn image(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }
}

/// Layer grouping child layers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupLayer {
    /// Name given in the editor.
    #[serde(default)]
    pub name: String,
    /// Children in draw order.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_layer_instances_are_row_major() {
        let layer = TileLayer {
            name: "ground".into(),
            width: 2,
            height: 2,
            data: [1, 0, 3, 4].map(TileInstance).to_vec(),
        };
        let cells: Vec<_> = layer.instances().map(|(c, r, t)| (c, r, t.gid())).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 0), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn empty_image_path_means_no_image() {
        assert_eq!(ImageLayer::default().image(), None);
        let layer = ImageLayer {
            name: "sky".into(),
            image: "sky.png".into(),
        };
        assert_eq!(layer.image(), Some("sky.png"));
    }
}
