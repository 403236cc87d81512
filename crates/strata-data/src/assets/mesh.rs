// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CPU geometry and GPU-ready interleaved meshes.

use bytemuck::{Pod, Zeroable};
use strata_core::{
    asset::Asset,
    math::{Aabb, Vec2, Vec3},
};

/// Triangle geometry kept on the CPU, for collision and picking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals; empty, or one per position.
    pub normals: Vec<Vec3>,
    /// Vertex texture coordinates; empty, or one per position.
    pub tex_coords: Vec<Vec2>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl Asset for Geometry {
    const KIND: &'static str = "geometry";
}

impl Geometry {
    /// The bounding box of all positions.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// The number of triangles described by the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends the vertices and triangles of `other`, offsetting its indices.
    ///
    /// Per-vertex attributes are dropped when only one side provides them.
    pub fn append(&mut self, other: &Geometry) {
        let offset = self.positions.len() as u32;
        let keep_normals = self.normals.len() == self.positions.len()
            && other.normals.len() == other.positions.len();
        let keep_tex_coords = self.tex_coords.len() == self.positions.len()
            && other.tex_coords.len() == other.positions.len();

        self.positions.extend_from_slice(&other.positions);
        if keep_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        if keep_tex_coords {
            self.tex_coords.extend_from_slice(&other.tex_coords);
        } else {
            self.tex_coords.clear();
        }
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Uniformly scales positions about the origin by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p = *p * factor;
        }
    }

    /// Fills `normals` with area-weighted face normals when none were provided.
    pub fn compute_normals(&mut self) {
        if self.normals.len() == self.positions.len() {
            return;
        }
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(&pa), Some(&pb), Some(&pc)) = (
                self.positions.get(a),
                self.positions.get(b),
                self.positions.get(c),
            ) else {
                continue;
            };
            let face = (pb - pa).cross(pc - pa);
            for i in [a, b, c] {
                normals[i] = normals[i] + face;
            }
        }
        self.normals = normals.iter().map(Vec3::normalize).collect();
    }
}

/// One interleaved vertex as laid out in a GPU vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position.
    pub position: Vec3,
    /// Normal.
    pub normal: Vec3,
    /// Texture coordinate.
    pub tex_coord: Vec2,
}

/// A GPU-ready mesh: interleaved vertices plus a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Interleaved vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box.
    pub bounding_box: Aabb,
}

impl Asset for Mesh {
    const KIND: &'static str = "mesh";
}

impl Mesh {
    /// Interleaves `geometry` into a vertex buffer layout.
    ///
    /// Missing normals or texture coordinates are zero-filled.
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let vertices = geometry
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: geometry.normals.get(i).copied().unwrap_or(Vec3::ZERO),
                tex_coord: geometry.tex_coords.get(i).copied().unwrap_or(Vec2::ZERO),
            })
            .collect();
        Self {
            vertices,
            indices: geometry.indices.clone(),
            bounding_box: geometry.bounds().unwrap_or(Aabb {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            }),
        }
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The stride of a single vertex in bytes.
    pub const fn vertex_size() -> usize {
        std::mem::size_of::<Vertex>()
    }
}
