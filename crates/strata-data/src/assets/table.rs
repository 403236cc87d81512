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

//! The process-wide asset handle table.

use super::{Geometry, Material, Mesh, Shader, Texture};
use std::sync::Arc;
use strata_core::asset::{Asset, AssetError, AssetHandle, AssetStore, BindOutcome};

/// One [`AssetStore`] per resource kind.
///
/// The table outlives scenes: opening a new scene keeps every bound resource,
/// so assets shared between scenes are loaded once. It is owned by the
/// top-level context and passed by reference to whatever needs it.
#[derive(Default)]
pub struct AssetTable {
    /// Decoded images.
    pub textures: AssetStore<Texture>,
    /// GPU-ready meshes.
    pub meshes: AssetStore<Mesh>,
    /// CPU geometry.
    pub geometry: AssetStore<Geometry>,
    /// Shader programs.
    pub shaders: AssetStore<Shader>,
    /// Material instances.
    pub materials: AssetStore<Material>,
}

/// An asset kind stored in the [`AssetTable`].
pub trait TableAsset: Asset + Sized {
    /// The store holding this kind.
    fn store(table: &AssetTable) -> &AssetStore<Self>;
    /// The store holding this kind, mutably.
    fn store_mut(table: &mut AssetTable) -> &mut AssetStore<Self>;
}

macro_rules! table_assets {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl TableAsset for $ty {
                fn store(table: &AssetTable) -> &AssetStore<Self> {
                    &table.$field
                }
                fn store_mut(table: &mut AssetTable) -> &mut AssetStore<Self> {
                    &mut table.$field
                }
            }
        )*
    };
}

table_assets! {
    Texture => textures,
    Mesh => meshes,
    Geometry => geometry,
    Shader => shaders,
    Material => materials,
}

impl AssetTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for kind `T`.
    pub fn store<T: TableAsset>(&self) -> &AssetStore<T> {
        T::store(self)
    }

    /// The store for kind `T`, mutably.
    pub fn store_mut<T: TableAsset>(&mut self) -> &mut AssetStore<T> {
        T::store_mut(self)
    }

    /// See [`AssetStore::get_or_create`].
    pub fn get_or_create<T: TableAsset>(&mut self, key: &str) -> AssetHandle<T> {
        self.store_mut::<T>().get_or_create(key)
    }

    /// See [`AssetStore::bind`].
    pub fn bind<T: TableAsset>(
        &mut self,
        key: &str,
        resource: impl Into<Arc<T>>,
    ) -> Result<BindOutcome, AssetError> {
        self.store_mut::<T>().bind(key, resource)
    }

    /// See [`AssetStore::is_resolved`].
    pub fn is_resolved<T: TableAsset>(&self, handle: &AssetHandle<T>) -> bool {
        self.store::<T>().is_resolved(handle)
    }

    /// See [`AssetStore::dereference`].
    pub fn dereference<T: TableAsset>(&self, handle: &AssetHandle<T>) -> Result<&Arc<T>, AssetError> {
        self.store::<T>().dereference(handle)
    }
}
