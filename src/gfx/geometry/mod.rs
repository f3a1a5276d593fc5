//! # Procedural Geometry Generation
//!
//! This module generates the primitive shapes the desk scene is built from,
//! so no model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2 x 2 in the XZ plane, facing +Y
//! - **Box**: unit cube centred at the origin
//! - **Cylinder / Tapered cylinder / Cone**: y from 0 to 1, base radius 1
//! - **Sphere / Half sphere**: radius 1 centred at the origin
//! - **Pyramid**: square 1 x 1 base at y = -0.5, apex at y = 0.5
//!
//! All meshes are Y-up with counter-clockwise winding seen from outside, and
//! use OpenGL-style UVs (v = 1 at the top of the image).
//!
//! ## Usage
//!
//! ```rust
//! use deskscene::gfx::geometry::{generate_cube, generate_sphere};
//!
//! let cube_data = generate_cube();
//! let sphere_data = generate_sphere(32, 16);
//! assert_eq!(cube_data.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::rendering::vertex::Vertex3D;

/// Addressable part of a mesh, used to draw cylinders without some caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshPart {
    Top,
    Bottom,
    Sides,
}

/// A contiguous run of indices belonging to one [`MeshPart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub part: MeshPart,
    pub start: u32,
    pub count: u32,
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    /// Named index ranges; empty for meshes that are always drawn whole
    pub parts: Vec<IndexRange>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends a vertex and returns its index
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Marks every index pushed since `start` as belonging to `part`
    pub fn close_part(&mut self, part: MeshPart, start: u32) {
        let count = self.indices.len() as u32 - start;
        if count > 0 {
            self.parts.push(IndexRange { part, start, count });
        }
    }

    pub fn part(&self, part: MeshPart) -> Option<IndexRange> {
        self.parts.iter().copied().find(|range| range.part == part)
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        (min, max)
    }

    /// Interleaves positions, normals and UVs into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
