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

use crate::ecs::{
    components::GeometryComponent, ComponentStore, Entity, StoreVisitor, StoreVisitorMut, System,
};

/// Stores the CPU-side geometry that collision queries run against.
#[derive(Debug, Default, Clone)]
pub struct CollisionSystem {
    /// Geometry attached to each entity.
    pub geometry: ComponentStore<GeometryComponent>,
}

impl CollisionSystem {
    /// Attaches geometry `key` to `entity`. Returns `None` if it already has one.
    pub fn create(&mut self, entity: Entity, key: &str) -> Option<&mut GeometryComponent> {
        let component = self.geometry.create(entity)?;
        *component = GeometryComponent::new(key);
        Some(component)
    }
}

impl System for CollisionSystem {
    fn visit_stores<V: StoreVisitor>(&self, visitor: &mut V) {
        visitor.visit_store(&self.geometry);
    }

    fn visit_stores_mut<V: StoreVisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_store(&mut self.geometry);
    }
}
