use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a map document or its resources.
///
/// Every variant is fatal to the load call that produced it: a caller gets
/// either a fully populated [`Resources`](crate::Resources) or one of these.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The image file could not be read.
    #[error("unable to open tileset image {}", path.display())]
    FileOpen {
        /// Resolved image path.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },

    /// The bytes of the image file are not a decodable image.
    #[error("unable to decode tileset image {}", path.display())]
    ImageDecode {
        /// Resolved image path.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Macroquad images store their sides as `u16`.
    #[error("image {} is too large ({width}x{height})", path.display())]
    ImageTooLarge {
        /// Resolved image path.
        path: PathBuf,
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },

    /// `tile_count` must be a non-zero multiple of `columns`.
    #[error(
        "tileset starting at gid {first_gid} has {tile_count} tiles which do not fill {columns} columns"
    )]
    UnevenTileset {
        /// First gid of the tileset.
        first_gid: u32,
        /// Number of tiles in the tileset.
        tile_count: u32,
        /// Tiles per image row.
        columns: u32,
    },

    /// The tileset's gids do not fit between 1 and the flip bits.
    #[error("tileset starting at gid {first_gid} with {tile_count} tiles exceeds the gid range")]
    GidRange {
        /// First gid of the tileset.
        first_gid: u32,
        /// Number of tiles in the tileset.
        tile_count: u32,
    },

    /// A computed tile frame falls outside of its source image.
    #[error(
        "tile {tile_id} bounds outside of texture bounds ({min_x}, {min_y}, {max_x}, {max_y})"
    )]
    Bounds {
        /// Local id of the tile within its tileset.
        tile_id: u32,
        /// Left edge of the frame.
        min_x: f32,
        /// Top edge of the frame.
        min_y: f32,
        /// Right edge of the frame.
        max_x: f32,
        /// Bottom edge of the frame.
        max_y: f32,
    },

    /// A layer resource failed to load.
    #[error("unable to load resources")]
    LoadLayers {
        /// The error raised by the failing layer.
        #[source]
        source: Box<ResourceError>,
    },

    /// Map documents are only read from JSON.
    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat {
        /// Path that was rejected.
        path: PathBuf,
    },

    /// A map or external tileset file could not be read.
    #[error("unable to read map file {}", path.display())]
    DocumentIo {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },

    /// A map or external tileset file is not valid Tiled JSON.
    #[error("unable to parse map file {}", path.display())]
    DocumentJson {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// In-memory map JSON is not valid Tiled JSON.
    #[error("unable to parse map document")]
    Parse {
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResourceError>;
