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

//! Value types that may appear as reflected fields.

use crate::{
    asset::{Asset, AssetHandle},
    ecs::{Entity, RemapTable, UnmappedEntity},
    math::{Aabb, Pose, Quaternion, Vec2, Vec3, Vec4},
};
use serde::{de::DeserializeOwned, Serialize};

/// A value that can be stored in a reflected field.
///
/// Fields must round-trip through serde. Types that hold entity references
/// override [`Field::remap_entities`] so that imported documents can have
/// their document-local ids substituted.
pub trait Field: Serialize + DeserializeOwned + 'static {
    /// Rewrites every entity reference held by this value.
    fn remap_entities(&mut self, table: &RemapTable) -> Result<(), UnmappedEntity> {
        let _ = table;
        Ok(())
    }
}

macro_rules! plain_fields {
    ($($ty:ty),* $(,)?) => {
        $(impl Field for $ty {})*
    };
}

plain_fields!(
    bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, f32, f64, String, Vec2, Vec3, Vec4,
    Quaternion, Pose, Aabb,
);

impl Field for Entity {
    fn remap_entities(&mut self, table: &RemapTable) -> Result<(), UnmappedEntity> {
        *self = table.remap(*self)?;
        Ok(())
    }
}

impl<T: Asset> Field for AssetHandle<T> {}

impl<T: Field> Field for Vec<T> {
    fn remap_entities(&mut self, table: &RemapTable) -> Result<(), UnmappedEntity> {
        self.iter_mut().try_for_each(|item| item.remap_entities(table))
    }
}

impl<T: Field> Field for Option<T> {
    fn remap_entities(&mut self, table: &RemapTable) -> Result<(), UnmappedEntity> {
        match self {
            Some(inner) => inner.remap_entities(table),
            None => Ok(()),
        }
    }
}
