// src/loader/json_loader.rs
use crate::document::{Layer, MapDocument, Tileset};
use crate::error::{ResourceError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
    #[serde(default)]
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTilesetRef {
    External { firstgid: u32, source: String },
    Embedded(Tileset),
}

#[derive(Deserialize)]
struct ExternalTileset {
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    image: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

impl JsonMap {
    fn resolve(self, map_dir: &Path) -> Result<MapDocument> {
        let tilesets = self
            .tilesets
            .into_iter()
            .map(|ts| match ts {
                JsonTilesetRef::Embedded(tileset) => Ok(tileset),
                JsonTilesetRef::External { firstgid, source } => {
                    load_external_tileset(map_dir, firstgid, &source)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MapDocument {
            width: self.width,
            height: self.height,
            tile_width: self.tilewidth,
            tile_height: self.tileheight,
            tilesets,
            layers: self.layers,
        })
    }
}

// The tileset's image is relative to the tileset file; rebase it onto the map
// directory so every image path in the document shares one base.
fn load_external_tileset(map_dir: &Path, first_gid: u32, source: &str) -> Result<Tileset> {
    let ts_path = map_dir.join(source);
    let ext_txt = std::fs::read_to_string(&ts_path).map_err(|source| ResourceError::DocumentIo {
        path: ts_path.clone(),
        source,
    })?;
    let ext: ExternalTileset =
        serde_json::from_str(&ext_txt).map_err(|source| ResourceError::DocumentJson {
            path: ts_path.clone(),
            source,
        })?;

    let image = Path::new(source)
        .parent()
        .map(|dir| dir.join(&ext.image))
        .unwrap_or_else(|| PathBuf::from(&ext.image));
    tracing::debug!(path = %ts_path.display(), first_gid, "loaded external tileset");

    Ok(Tileset {
        first_gid,
        image: image.to_string_lossy().into_owned(),
        tile_count: ext.tilecount,
        columns: ext.columns,
        tile_width: ext.tilewidth,
        tile_height: ext.tileheight,
        margin: ext.margin,
        spacing: ext.spacing,
    })
}

impl MapDocument {
    /// Parses a Tiled JSON map; external tilesets are read relative to
    /// `map_dir`.
    pub fn from_json_str(json: &str, map_dir: impl AsRef<Path>) -> Result<Self> {
        let raw: JsonMap =
            serde_json::from_str(json).map_err(|source| ResourceError::Parse { source })?;
        raw.resolve(map_dir.as_ref())
    }
}

/// Reads a Tiled JSON map and returns it with the directory it lives in,
/// which is where its image paths are relative to.
pub fn decode_map_file(path: impl AsRef<Path>) -> Result<(MapDocument, PathBuf)> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(ResourceError::UnsupportedFormat {
            path: p.to_path_buf(),
        });
    }

    let txt = std::fs::read_to_string(p).map_err(|source| ResourceError::DocumentIo {
        path: p.to_path_buf(),
        source,
    })?;
    let raw: JsonMap = serde_json::from_str(&txt).map_err(|source| ResourceError::DocumentJson {
        path: p.to_path_buf(),
        source,
    })?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));
    let doc = raw.resolve(&map_dir)?;

    tracing::debug!(
        path = %p.display(),
        tilesets = doc.tilesets.len(),
        layers = doc.layers.len(),
        "decoded map document"
    );
    Ok((doc, map_dir))
}
