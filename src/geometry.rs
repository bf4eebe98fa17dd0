//! Vertex buffers for tiles and their conversion to macroquad meshes.

use macroquad::models::{Mesh, Vertex};
use macroquad::prelude::*;

/// Most vertices a single mesh takes: whole quads addressable by `u16` indices.
pub const MAX_MESH_VERTICES: usize = (u16::MAX as usize / 6) * 6;

/// One corner of a tile triangle.
///
/// `picture` is the texture sample position in source image pixels, with the
/// origin at the bottom-left corner of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVertex {
    /// Position in world space.
    pub position: Vec2,
    /// Texture sample position in image pixels.
    pub picture: Vec2,
    /// Tint.
    pub color: Color,
    /// How much of the texture shows through the tint, 1 being all of it.
    pub intensity: f32,
}

/// Two triangles covering a tile frame, centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitQuad {
    vertices: [TileVertex; 6],
}

impl UnitQuad {
    /// Quad of the frame's size, sampling the frame.
    pub fn new(frame: Rect) -> Self {
        let half_w = vec2(frame.w / 2.0, 0.0);
        let half_h = vec2(0.0, frame.h / 2.0);
        let corners = [
            -half_w - half_h,
            half_w - half_h,
            half_w + half_h,
            -half_w - half_h,
            half_w + half_h,
            -half_w + half_h,
        ];
        let center = frame.center();
        let vertices = corners.map(|position| TileVertex {
            position,
            picture: center + position,
            color: WHITE,
            intensity: 1.0,
        });
        UnitQuad { vertices }
    }

    /// The six corners, two triangles in counter-clockwise order.
    pub fn vertices(&self) -> &[TileVertex; 6] {
        &self.vertices
    }

    /// Mutable corners, for transforming a clone of an atlas template.
    pub fn vertices_mut(&mut self) -> &mut [TileVertex; 6] {
        &mut self.vertices
    }
}

/// A geometry buffer that can be overwritten with a fresh set of vertices.
pub trait Triangles {
    /// Replaces the buffer's contents with `vertices`.
    fn update(&mut self, vertices: &[TileVertex]);
}

/// Plain triangle list, three vertices per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrianglesData {
    vertices: Vec<TileVertex>,
}

impl TrianglesData {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices, three per triangle.
    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// `true` when the buffer holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends the vertices of `other`, used to batch many tiles into one draw.
    pub fn append(&mut self, other: &TrianglesData) {
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Converts the buffer into macroquad meshes sampling an image of
    /// `image_size` pixels.
    ///
    /// Mesh indices are `u16`, so buffers larger than [`MAX_MESH_VERTICES`]
    /// are split into several meshes sharing `texture`. Picture coordinates
    /// are Y-up while texture UVs grow downwards, so the V axis is flipped
    /// here.
    pub fn to_meshes(&self, image_size: Vec2, texture: Option<Texture2D>) -> Vec<Mesh> {
        self.vertices
            .chunks(MAX_MESH_VERTICES)
            .map(|chunk| {
                let vertices = chunk
                    .iter()
                    .map(|v| {
                        Vertex::new(
                            v.position.x,
                            v.position.y,
                            0.0,
                            v.picture.x / image_size.x,
                            1.0 - v.picture.y / image_size.y,
                            v.color,
                        )
                    })
                    .collect::<Vec<_>>();
                // chunk length never exceeds MAX_MESH_VERTICES < u16::MAX
                let indices = (0..chunk.len()).map(|i| i as u16).collect();
                Mesh {
                    vertices,
                    indices,
                    texture: texture.clone(),
                }
            })
            .collect()
    }
}

impl Triangles for TrianglesData {
    fn update(&mut self, vertices: &[TileVertex]) {
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
    }
}
