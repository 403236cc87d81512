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

//! glTF 2.0 decoding, for both `.gltf` and `.glb` files.

use super::{AssetLoader, LoadError, Model};
use ::gltf::{buffer, mesh::Mode, Document};
use std::path::Path;
use strata_core::math::{Vec2, Vec3};
use strata_data::assets::Geometry;

/// Decodes every triangle mesh of a glTF document into a sub-mesh.
///
/// Meshes are named by their `name` property, or `mesh<index>` when unnamed.
/// All triangle-list primitives of a mesh are merged; other topologies are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl AssetLoader<Model> for GltfLoader {
    fn load_bytes(&self, bytes: &[u8]) -> Result<Model, LoadError> {
        let (document, buffers, _images) = ::gltf::import_slice(bytes)?;
        collect_meshes(&document, &buffers)
    }

    /// Imports from disk so that external buffers resolve next to the file.
    fn load(&self, path: &Path) -> Result<Model, LoadError> {
        let (document, buffers, _images) = ::gltf::import(path)?;
        collect_meshes(&document, &buffers)
    }
}

fn collect_meshes(document: &Document, buffers: &[buffer::Data]) -> Result<Model, LoadError> {
    let mut model = Model::default();
    for mesh in document.meshes() {
        let name = match mesh.name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("mesh{}", mesh.index()),
        };
        for primitive in mesh.primitives() {
            if primitive.mode() != Mode::Triangles {
                log::debug!(
                    "[gltf] skipping {:?} primitive of mesh '{name}'",
                    primitive.mode()
                );
                continue;
            }
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|data| &data.0[..]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions.map(|[x, y, z]| Vec3::new(x, y, z)).collect();
            let normals = reader
                .read_normals()
                .map(|iter| iter.map(|[x, y, z]| Vec3::new(x, y, z)).collect())
                .unwrap_or_default();
            let tex_coords = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().map(|[u, v]| Vec2::new(u, v)).collect())
                .unwrap_or_default();
            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            model.push(
                &name,
                Geometry {
                    positions,
                    normals,
                    tex_coords,
                    indices,
                },
            );
        }
    }

    if model.sub_meshes.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(model)
}
