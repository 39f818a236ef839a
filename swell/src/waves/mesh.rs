//! Render buffers for the wave grid.
//!
//! Indices and UVs are fixed for the lifetime of the grid; positions and
//! normals are refreshed from the heightfield after each regeneration.

use bevy::math::{Vec2, Vec3};

use super::heightfield::HeightField;

/// Indices emitted per grid cell (two triangles).
pub const QUAD_INDEX_COUNT: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn new(field: &HeightField) -> Self {
        let mut mesh = Self {
            positions: field.vertices().to_vec(),
            normals: vec![Vec3::Y; field.vertices().len()],
            uvs: generate_uvs(field.dimension(), field.uv_scale()),
            indices: generate_triangles(field.dimension()),
        };
        mesh.recalculate_normals();
        mesh
    }

    /// Copies the current elevations and recomputes normals. Never reallocates.
    pub fn update(&mut self, field: &HeightField) {
        debug_assert_eq!(self.positions.len(), field.vertices().len());
        self.positions.copy_from_slice(field.vertices());
        self.recalculate_normals();
    }

    /// Area-weighted vertex normals from the triangle list.
    pub fn recalculate_normals(&mut self) {
        self.normals.fill(Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face =
                (self.positions[b] - self.positions[a]).cross(self.positions[c] - self.positions[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or(Vec3::Y);
        }
    }
}

fn index(dimension: u32, x: u32, z: u32) -> u32 {
    x * (dimension + 1) + z
}

/// Two triangles per cell, wound so a flat grid faces +Y.
pub fn generate_triangles(dimension: u32) -> Vec<u32> {
    let mut triangles = Vec::with_capacity((dimension * dimension) as usize * QUAD_INDEX_COUNT);

    for x in 0..dimension {
        for z in 0..dimension {
            triangles.extend_from_slice(&[
                index(dimension, x, z),
                index(dimension, x + 1, z + 1),
                index(dimension, x + 1, z),
                index(dimension, x, z),
                index(dimension, x, z + 1),
                index(dimension, x + 1, z + 1),
            ]);
        }
    }

    triangles
}

/// Texture coordinates mirrored every `uv_scale` cells so the texture tiles without seams.
pub fn generate_uvs(dimension: u32, uv_scale: f32) -> Vec<Vec2> {
    let mirror = |t: f32| if t <= 1.0 { t } else { 2.0 - t };
    let mut uvs = Vec::with_capacity(((dimension + 1) * (dimension + 1)) as usize);

    for x in 0..=dimension {
        for z in 0..=dimension {
            let u = (x as f32 / uv_scale) % 2.0;
            let v = (z as f32 / uv_scale) % 2.0;
            uvs.push(Vec2::new(mirror(u), mirror(v)));
        }
    }

    uvs
}
