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

use crate::assets::Geometry;
use strata_core::asset::AssetHandle;
use strata_macros::{Component, Reflect};

/// Attaches CPU-side geometry to an entity, for collision consumers.
#[derive(Debug, Clone, Default, PartialEq, Component, Reflect)]
pub struct GeometryComponent {
    /// The geometry, keyed as `file/submesh`.
    #[reflect(rename = "cpu_mesh_handle")]
    pub geometry: AssetHandle<Geometry>,
}

impl GeometryComponent {
    /// Creates a component referring to `key`.
    pub fn new(key: &str) -> Self {
        Self {
            geometry: AssetHandle::new(key),
        }
    }
}
