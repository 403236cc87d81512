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

use super::{SceneError, TYPE_TAG_PREFIX};
use crate::reflect_json::fields_from_json;
use serde_json::{Map, Value};
use strata_core::reflect::remap_fields;
use strata_data::ecs::{
    Component, ComponentStore, Entity, EntityOrchestrator, Environment, RemapTable,
    StoreVisitorMut, System, SystemVisitorMut,
};
use strata_telemetry::ScopedTimer;

/// Replaces the contents of `env` with the entities described by `document`.
///
/// Every existing entity is destroyed first. Each document entity receives a
/// fresh id from `orchestrator`, and every entity reference held in a
/// component is rewritten to the new ids. Derived state (world transforms) is
/// refreshed once, after all components exist.
///
/// On error the environment is left empty. The returned table maps
/// document-local ids to the ids now live in `env`.
pub fn import_scene(
    document: &Value,
    env: &mut Environment,
    orchestrator: &mut EntityOrchestrator,
) -> Result<RemapTable, SceneError> {
    let _timer = ScopedTimer::new("[scene] import");

    env.destroy(Entity::ALL);
    match populate(document, env, orchestrator) {
        Ok(table) => {
            env.refresh();
            log::info!("[scene] imported {} entities", table.len());
            Ok(table)
        }
        Err(err) => {
            log::error!("[scene] import failed, environment reset: {}", err);
            env.destroy(Entity::ALL);
            Err(err)
        }
    }
}

fn populate(
    document: &Value,
    env: &mut Environment,
    orchestrator: &mut EntityOrchestrator,
) -> Result<RemapTable, SceneError> {
    let entities = document
        .as_object()
        .ok_or_else(|| SceneError::malformed("<root>", "expected an object of entities"))?;

    // Every id is issued before any component is read, so references can point forward.
    let mut table = RemapTable::new();
    let mut parsed = Vec::with_capacity(entities.len());
    for (key, components) in entities {
        let old: Entity = key
            .parse()
            .map_err(|_| SceneError::malformed(key, "entity id is not an unsigned integer"))?;
        if !old.is_valid() || old == Entity::ALL {
            return Err(SceneError::malformed(key, "entity id is a reserved sentinel"));
        }
        if table.get(old).is_some() {
            return Err(SceneError::malformed(
                key,
                format!("entity id {old} appears more than once"),
            ));
        }
        let new = env.spawn(orchestrator);
        table.insert(old, new);
        parsed.push((key, old, new, components));
    }

    for (key, old, new, components) in parsed {
        let components = components
            .as_object()
            .ok_or_else(|| SceneError::malformed(key, "expected an object of components"))?;

        for (tag, fields) in components {
            let component_key = format!("{key}/{tag}");
            let Some(type_name) = tag.strip_prefix(TYPE_TAG_PREFIX) else {
                return Err(SceneError::malformed(
                    component_key,
                    format!("component key is missing the '{TYPE_TAG_PREFIX}' type tag"),
                ));
            };
            let fields = fields
                .as_object()
                .ok_or_else(|| SceneError::malformed(&component_key, "expected an object of fields"))?;

            let mut loader = ComponentLoader {
                type_name,
                key: &component_key,
                entity: new,
                fields,
                table: &table,
                outcome: None,
            };
            env.visit_systems_mut(&mut loader);
            match loader.outcome {
                Some(result) => result?,
                None => {
                    return Err(SceneError::UnknownComponentType {
                        entity: old,
                        type_name: type_name.to_owned(),
                    })
                }
            }
        }
    }

    Ok(table)
}

/// Finds the store whose component type matches `type_name` and fills a new
/// component from the document.
struct ComponentLoader<'a> {
    type_name: &'a str,
    key: &'a str,
    entity: Entity,
    fields: &'a Map<String, Value>,
    table: &'a RemapTable,
    outcome: Option<Result<(), SceneError>>,
}

impl SystemVisitorMut for ComponentLoader<'_> {
    fn visit_system<S: System>(&mut self, _: &'static str, system: &mut S) {
        if self.outcome.is_none() {
            system.visit_stores_mut(self);
        }
    }
}

impl StoreVisitorMut for ComponentLoader<'_> {
    fn visit_store<C: Component>(&mut self, store: &mut ComponentStore<C>) {
        if self.outcome.is_some() || C::TYPE_NAME != self.type_name {
            return;
        }
        let mut component = C::default();
        let result = fields_from_json(&mut component, self.fields, self.key)
            .map_err(|err| SceneError::malformed(self.key, err.to_string()))
            .and_then(|()| {
                remap_fields(&mut component, self.table)
                    .map_err(|err| SceneError::malformed(self.key, err.to_string()))
            });
        if result.is_ok() && store.insert(self.entity, component).is_some() {
            log::warn!("[scene] {} replaced an existing component", self.key);
        }
        self.outcome = Some(result);
    }
}
