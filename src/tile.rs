use serde::Deserialize;

/// Horizontal flip bit of a raw gid.
pub const FLIP_H: u32 = 0x8000_0000; // bit 31
/// Vertical flip bit of a raw gid.
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
/// Diagonal (anti-diagonal) flip bit of a raw gid.
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
/// Bits of a raw gid that hold the tile id. Larger gids are unaddressable.
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

/// A placed tile as stored in a tile layer: a global tile id plus flip bits.
///
/// A gid of `0` marks an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TileInstance(pub u32);

impl TileInstance {
    /// Builds an instance from a clean gid and explicit flip flags.
    pub fn new(gid: u32, flips: FlipFlags) -> Self {
        let mut raw = gid & GID_MASK;
        if flips.horizontal {
            raw |= FLIP_H;
        }
        if flips.vertical {
            raw |= FLIP_V;
        }
        if flips.diagonal {
            raw |= FLIP_D;
        }
        TileInstance(raw)
    }

    /// The value exactly as stored in the layer.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// Global tile id with the flip bits cleared.
    #[inline] pub fn gid(self) -> u32 { self.0 & GID_MASK }
    /// True for cells with no tile.
    #[inline] pub fn is_empty(self) -> bool { self.gid() == 0 }
    /// Mirrored across the vertical axis.
    #[inline] pub fn flipped_horizontally(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Mirrored across the horizontal axis.
    #[inline] pub fn flipped_vertically(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// Mirrored across the anti-diagonal.
    #[inline] pub fn flipped_diagonally(self) -> bool { (self.0 & FLIP_D) != 0 }

    /// All three flip bits as flags.
    pub fn flips(self) -> FlipFlags {
        FlipFlags {
            diagonal: self.flipped_diagonally(),
            horizontal: self.flipped_horizontally(),
            vertical: self.flipped_vertically(),
        }
    }
}

/// The three independent mirroring flags of a tile instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipFlags {
    /// See [`TileInstance::flipped_diagonally`].
    pub diagonal: bool,
    /// See [`TileInstance::flipped_horizontally`].
    pub horizontal: bool,
    /// See [`TileInstance::flipped_vertically`].
    pub vertical: bool,
}

impl FlipFlags {
    /// No flips.
    pub const NONE: FlipFlags = FlipFlags {
        diagonal: false,
        horizontal: false,
        vertical: false,
    };
}
