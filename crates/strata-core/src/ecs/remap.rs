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

use super::Entity;
use std::collections::HashMap;

/// Raised when an entity reference has no counterpart in a [`RemapTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("entity {0} is not present in the remap table")]
pub struct UnmappedEntity(pub Entity);

/// The old-id to new-id substitution table built while importing a scene document.
///
/// Ids stored in a document are local to that document. Each one is replaced by a
/// freshly issued id on import, and every cross-entity reference held by a component
/// must be rewritten through this same table.
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    map: HashMap<Entity, Entity>,
}

impl RemapTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `old` (document-local) now lives as `new`.
    pub fn insert(&mut self, old: Entity, new: Entity) {
        self.map.insert(old, new);
    }

    /// Looks up the live id for a document-local id.
    pub fn get(&self, old: Entity) -> Option<Entity> {
        self.map.get(&old).copied()
    }

    /// Substitutes a reference. [`Entity::INVALID`] maps to itself.
    pub fn remap(&self, old: Entity) -> Result<Entity, UnmappedEntity> {
        if old == Entity::INVALID {
            return Ok(Entity::INVALID);
        }
        self.get(old).ok_or(UnmappedEntity(old))
    }

    /// Number of recorded substitutions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(old, new)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, Entity)> + '_ {
        self.map.iter().map(|(old, new)| (*old, *new))
    }
}
