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
use crate::reflect_json::{fields_to_json, FieldError};
use serde_json::{Map, Value};
use strata_data::ecs::{Component, ComponentVisitor, Entity, Environment};
use strata_telemetry::ScopedTimer;

/// Encodes the live environment as a scene document.
///
/// Entities appear in tracking order, components in system visitation order
/// and fields in reflection order. The environment is not modified.
pub fn export_scene(env: &Environment) -> Result<Value, SceneError> {
    let _timer = ScopedTimer::new("[scene] export");

    let mut document = Map::new();
    for &entity in env.entity_list() {
        let mut writer = ComponentWriter {
            components: Map::new(),
            error: None,
        };
        env.visit_entity_components(entity, &mut writer);
        if let Some((type_name, err)) = writer.error {
            let key = format!("{entity}/{TYPE_TAG_PREFIX}{type_name}");
            return Err(match err {
                FieldError::Encode { source, .. } => SceneError::Encode(source),
                other => SceneError::malformed(key, other.to_string()),
            });
        }
        document.insert(entity.to_string(), Value::Object(writer.components));
    }

    log::info!("[scene] exported {} entities", document.len());
    Ok(Value::Object(document))
}

struct ComponentWriter {
    components: Map<String, Value>,
    error: Option<(&'static str, FieldError)>,
}

impl ComponentVisitor for ComponentWriter {
    fn visit_component<C: Component>(&mut self, _: Entity, component: &C) {
        if self.error.is_some() {
            return;
        }
        match fields_to_json(component) {
            Ok(fields) => {
                self.components
                    .insert(format!("{TYPE_TAG_PREFIX}{}", C::TYPE_NAME), Value::Object(fields));
            }
            Err(err) => self.error = Some((C::TYPE_NAME, err)),
        }
    }
}
