//! Turning placed tiles into triangles.

pub mod flip;
mod tile;

pub use flip::{active_flips, apply_flips, Flip};
