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
    components::IdentifierComponent, ComponentStore, Entity, StoreVisitor, StoreVisitorMut,
    System,
};

/// Stores entity names.
#[derive(Debug, Default, Clone)]
pub struct IdentifierSystem {
    /// The name of each named entity.
    pub identifiers: ComponentStore<IdentifierComponent>,
}

impl IdentifierSystem {
    /// Names `entity`. Returns `None` if it already has a name.
    pub fn create(&mut self, entity: Entity, id: &str) -> Option<&mut IdentifierComponent> {
        let component = self.identifiers.create(entity)?;
        component.id = id.to_owned();
        Some(component)
    }

    /// Returns the name of `entity`.
    pub fn get(&self, entity: Entity) -> Option<&str> {
        self.identifiers.get(entity).map(|c| c.id.as_str())
    }

    /// Returns the lowest entity carrying the name `id`.
    pub fn find(&self, id: &str) -> Option<Entity> {
        self.identifiers
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(e, _)| e)
    }
}

impl System for IdentifierSystem {
    fn visit_stores<V: StoreVisitor>(&self, visitor: &mut V) {
        visitor.visit_store(&self.identifiers);
    }

    fn visit_stores_mut<V: StoreVisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_store(&mut self.identifiers);
    }
}
