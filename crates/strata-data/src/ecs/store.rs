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

//! A typed, entity-keyed store for one component kind.

use super::{Component, Entity};
use std::collections::BTreeMap;

/// Holds at most one component of type `C` per entity.
///
/// Iteration is ordered by entity id.
#[derive(Debug, Clone)]
pub struct ComponentStore<C: Component> {
    components: BTreeMap<Entity, C>,
}

impl<C: Component> Default for ComponentStore<C> {
    fn default() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }
}

impl<C: Component> ComponentStore<C> {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a default component to `entity`.
    ///
    /// Returns `None` when the entity already has a component in this store;
    /// the existing component is left untouched.
    pub fn create(&mut self, entity: Entity) -> Option<&mut C> {
        if self.components.contains_key(&entity) {
            return None;
        }
        Some(self.components.entry(entity).or_default())
    }

    /// Attaches `component` to `entity`, returning the one it replaced.
    pub fn insert(&mut self, entity: Entity, component: C) -> Option<C> {
        self.components.insert(entity, component)
    }

    /// Returns the component attached to `entity`.
    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.components.get(&entity)
    }

    /// Returns the component attached to `entity`, mutably.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.components.get_mut(&entity)
    }

    /// Detaches and returns the component attached to `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        self.components.remove(&entity)
    }

    /// Returns `true` if `entity` has a component in this store.
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    /// Iterates `(entity, component)` pairs in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.components.iter().map(|(e, c)| (*e, c))
    }

    /// Iterates `(entity, component)` pairs mutably, in entity order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.components.iter_mut().map(|(e, c)| (*e, c))
    }

    /// The number of components held.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}
