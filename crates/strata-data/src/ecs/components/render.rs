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

//! Renderable components.

use crate::assets::{Material, Mesh};
use strata_core::asset::AssetHandle;
use strata_macros::{Component, Reflect};

/// Attaches a GPU-ready mesh to an entity.
#[derive(Debug, Clone, Default, PartialEq, Component, Reflect)]
pub struct MeshComponent {
    /// The mesh, keyed as `file/submesh`.
    #[reflect(rename = "gpu_mesh_handle")]
    pub mesh: AssetHandle<Mesh>,
}

impl MeshComponent {
    /// Creates a component referring to `key`.
    pub fn new(key: &str) -> Self {
        Self {
            mesh: AssetHandle::new(key),
        }
    }
}

/// Attaches a material instance and its shadow flags to an entity.
#[derive(Debug, Clone, PartialEq, Component, Reflect)]
pub struct MaterialComponent {
    /// The material instance, keyed by its library name.
    #[reflect(rename = "material_handle")]
    pub material: AssetHandle<Material>,
    /// Whether the surface receives shadows.
    pub receive_shadow: bool,
    /// Whether the surface casts shadows.
    pub cast_shadow: bool,
}

impl Default for MaterialComponent {
    fn default() -> Self {
        Self {
            material: AssetHandle::default(),
            receive_shadow: true,
            cast_shadow: true,
        }
    }
}

impl MaterialComponent {
    /// Creates a shadow-casting, shadow-receiving component referring to `key`.
    pub fn new(key: &str) -> Self {
        Self {
            material: AssetHandle::new(key),
            ..Default::default()
        }
    }
}
