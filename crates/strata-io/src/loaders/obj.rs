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

//! Wavefront OBJ decoding.

use super::{AssetLoader, LoadError, Model};
use ahash::AHashMap;
use strata_core::math::{Vec2, Vec3};
use strata_data::assets::Geometry;

/// Decodes OBJ text into one sub-mesh per named object.
///
/// Objects sharing a name are merged, which also folds every unnamed object
/// into the single `unnamed_object` part `tobj` reports. Material libraries
/// are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl AssetLoader<Model> for ObjLoader {
    fn load_bytes(&self, bytes: &[u8]) -> Result<Model, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(
            &mut std::io::Cursor::new(bytes),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Ok((Vec::new(), AHashMap::new())),
        )?;

        let mut model = Model::default();
        for obj in models {
            let mesh = obj.mesh;
            if mesh.indices.is_empty() {
                continue;
            }
            let geometry = Geometry {
                positions: mesh
                    .positions
                    .chunks_exact(3)
                    .map(|v| Vec3::new(v[0], v[1], v[2]))
                    .collect(),
                normals: mesh
                    .normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2]))
                    .collect(),
                tex_coords: mesh
                    .texcoords
                    .chunks_exact(2)
                    .map(|t| Vec2::new(t[0], t[1]))
                    .collect(),
                indices: mesh.indices,
            };
            model.push(&obj.name, geometry);
        }

        if model.sub_meshes.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOT: &str = "\
o arm
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o leg
v 0 0 1
v 1 0 1
v 0 1 1
f 5 6 7
";

    #[test]
    fn test_named_objects_become_sub_meshes() {
        // --- 1. ACT ---
        let model = ObjLoader.load_bytes(ROBOT.as_bytes()).unwrap();

        // --- 2. ASSERT ---
        let names: Vec<_> = model.sub_meshes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["arm", "leg"]);

        let arm = &model.get("arm").unwrap().geometry;
        assert_eq!(arm.triangle_count(), 2, "the quad should be triangulated");
        assert!(arm.normals.is_empty());
        assert_eq!(model.get("leg").unwrap().geometry.positions.len(), 3);
    }

    #[test]
    fn test_same_named_objects_merge() {
        let text = "o part\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no part\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let model = ObjLoader.load_bytes(text.as_bytes()).unwrap();

        assert_eq!(model.sub_meshes.len(), 1);
        let part = &model.get("part").unwrap().geometry;
        assert_eq!(part.positions.len(), 6);
        assert_eq!(part.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unnamed_objects_share_one_part() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let model = ObjLoader.load_bytes(text.as_bytes()).unwrap();

        let names: Vec<_> = model.sub_meshes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["unnamed_object"]);
        assert_eq!(model.get("unnamed_object").unwrap().geometry.triangle_count(), 2);
    }

    #[test]
    fn test_file_without_faces_is_empty() {
        assert!(matches!(
            ObjLoader.load_bytes(b"v 0 0 0\n"),
            Err(LoadError::Empty)
        ));
    }
}
