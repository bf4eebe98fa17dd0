//! Tile flip operations and their fixed application order.

use macroquad::math::{Mat2, Vec2};

use crate::geometry::TileVertex;
use crate::tile::FlipFlags;

/// One of the three mirror operations a tile instance can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// `(x, y) -> (-y, x)`
    Diagonal,
    /// `(x, y) -> (-x, y)`
    Horizontal,
    /// `(x, y) -> (x, -y)`
    Vertical,
}

impl Flip {
    /// Order in which active flips are applied. Tiled decodes the bits in this
    /// order and the operations do not commute.
    pub const ORDER: [Flip; 3] = [Flip::Diagonal, Flip::Horizontal, Flip::Vertical];

    /// Linear map applied to vertex positions around the quad centre.
    pub fn matrix(self) -> Mat2 {
        match self {
            Flip::Diagonal => Mat2::from_cols(Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0)),
            Flip::Horizontal => Mat2::from_cols(Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0)),
            Flip::Vertical => Mat2::from_cols(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0)),
        }
    }

    fn is_set(self, flags: FlipFlags) -> bool {
        match self {
            Flip::Diagonal => flags.diagonal,
            Flip::Horizontal => flags.horizontal,
            Flip::Vertical => flags.vertical,
        }
    }
}

/// Active flips of `flags`, in application order.
pub fn active_flips(flags: FlipFlags) -> impl Iterator<Item = Flip> {
    Flip::ORDER.into_iter().filter(move |flip| flip.is_set(flags))
}

/// Applies every active flip of `flags` to `vertices`, in [`Flip::ORDER`].
pub fn apply_flips(flags: FlipFlags, vertices: &mut [TileVertex]) {
    for flip in active_flips(flags) {
        let m = flip.matrix();
        for v in vertices.iter_mut() {
            v.position = m * v.position;
        }
    }
}
