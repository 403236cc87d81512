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

//! The `System` contract and the visitors used to traverse systems generically.
//!
//! A system owns one or more [`ComponentStore`]s. Instead of a runtime type
//! registry, every system enumerates its stores to a visitor whose method is
//! generic over the component type. Serialization, deletion, copying and
//! inspection are each one visitor, written once for all component types.

use super::{Component, ComponentStore, Entity};

/// Receives each store of a system by shared reference.
pub trait StoreVisitor {
    /// Called once per store, in the system's declaration order.
    fn visit_store<C: Component>(&mut self, store: &ComponentStore<C>);
}

/// Receives each store of a system by mutable reference.
pub trait StoreVisitorMut {
    /// Called once per store, in the system's declaration order.
    fn visit_store<C: Component>(&mut self, store: &mut ComponentStore<C>);
}

/// Receives each component attached to one entity.
pub trait ComponentVisitor {
    /// Called once per component found for the visited entity.
    fn visit_component<C: Component>(&mut self, entity: Entity, component: &C);
}

/// Receives each system of an environment by shared reference.
pub trait SystemVisitor {
    /// Called once per system with its human-readable name.
    fn visit_system<S: System>(&mut self, name: &'static str, system: &S);
}

/// Receives each system of an environment by mutable reference.
pub trait SystemVisitorMut {
    /// Called once per system with its human-readable name.
    fn visit_system<S: System>(&mut self, name: &'static str, system: &mut S);
}

/// A typed owner of component stores.
pub trait System {
    /// Enumerates this system's stores.
    fn visit_stores<V: StoreVisitor>(&self, visitor: &mut V);

    /// Enumerates this system's stores mutably.
    fn visit_stores_mut<V: StoreVisitorMut>(&mut self, visitor: &mut V);

    /// Removes every component `entity` has in this system.
    fn destroy(&mut self, entity: Entity) {
        struct Remove(Entity);
        impl StoreVisitorMut for Remove {
            fn visit_store<C: Component>(&mut self, store: &mut ComponentStore<C>) {
                store.remove(self.0);
            }
        }
        self.visit_stores_mut(&mut Remove(entity));
    }

    /// Removes every component of each of `entities` as one bulk change.
    fn destroy_batch(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.destroy(entity);
        }
    }

    /// Clones every component `src` has in this system onto `dest`.
    ///
    /// Components `dest` already has are replaced.
    fn copy(&mut self, src: Entity, dest: Entity) {
        struct Duplicate {
            src: Entity,
            dest: Entity,
        }
        impl StoreVisitorMut for Duplicate {
            fn visit_store<C: Component>(&mut self, store: &mut ComponentStore<C>) {
                if let Some(component) = store.get(self.src).cloned() {
                    store.insert(self.dest, component);
                }
            }
        }
        self.visit_stores_mut(&mut Duplicate { src, dest });
    }

    /// Visits every component `entity` has in this system.
    fn visit_components<V: ComponentVisitor>(&self, entity: Entity, visitor: &mut V) {
        struct Forward<'a, V> {
            entity: Entity,
            visitor: &'a mut V,
        }
        impl<V: ComponentVisitor> StoreVisitor for Forward<'_, V> {
            fn visit_store<C: Component>(&mut self, store: &ComponentStore<C>) {
                if let Some(component) = store.get(self.entity) {
                    self.visitor.visit_component(self.entity, component);
                }
            }
        }
        self.visit_stores(&mut Forward { entity, visitor });
    }

    /// Recomputes derived state after bulk changes. No-op by default.
    fn refresh(&mut self) {}
}
