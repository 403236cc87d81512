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


use crate::helpers::*;
use anyhow::{Context, Result};
use std::path::Path;
use strata_core::reflect::{Field, FieldMeta, FieldVisitor};
use strata_data::ecs::{Component, ComponentVisitor, Entity, EntityOrchestrator, Environment};
use strata_io::scene::load_scene;

/// Prints every entity of `scene` with its components and field values.
pub fn inspect(scene: &Path, meta: bool) -> Result<()> {
    let mut env = Environment::new();
    load_scene(scene, &mut env, &mut EntityOrchestrator::new())
        .with_context(|| format!("Failed to load scene '{}'", scene.display()))?;

    print_task_start(&scene.display().to_string(), CYAN);
    for line in describe(&env, meta) {
        println!("{line}");
    }
    println!(
        "\n{}{} entities{}",
        BOLD,
        env.entity_list().len(),
        RESET
    );
    Ok(())
}

/// One line per entity, component and field, indented by nesting level.
fn describe(env: &Environment, meta: bool) -> Vec<String> {
    let mut printer = Printer {
        lines: Vec::new(),
        meta,
    };
    for &entity in env.entity_list() {
        let name = env.identifier.get(entity).unwrap_or("<unnamed>");
        printer
            .lines
            .push(format!("{BOLD}{entity}{RESET} {DIM}{name}{RESET}"));
        env.visit_entity_components(entity, &mut printer);
    }
    printer.lines
}

struct Printer {
    lines: Vec<String>,
    meta: bool,
}

impl ComponentVisitor for Printer {
    fn visit_component<C: Component>(&mut self, _: Entity, component: &C) {
        self.lines.push(format!("  {MAGENTA}@{}{RESET}", C::TYPE_NAME));
        component.visit_fields(self);
    }
}

impl FieldVisitor for Printer {
    fn visit_field<F: Field>(&mut self, name: &'static str, value: &F, meta: &FieldMeta) {
        let value = serde_json::to_string(value).unwrap_or_else(|err| format!("<{err}>"));
        let mut line = format!("    {name} = {value}");
        if self.meta {
            if let Some(range) = meta.range {
                line.push_str(&format!(" {DIM}[{}, {}]{RESET}", range.min, range.max));
            }
            if meta.hidden {
                line.push_str(&format!(" {DIM}(hidden){RESET}"));
            }
        }
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_data::ecs::components::PointLightComponent;

    #[test]
    fn test_describe_lists_fields_with_metadata() {
        let mut orchestrator = EntityOrchestrator::new();
        let mut env = Environment::new();
        let lamp = env.spawn(&mut orchestrator);
        env.identifier.create(lamp, "lamp");
        env.render
            .point_lights
            .insert(lamp, PointLightComponent::default());

        let lines = describe(&env, true);

        assert!(lines[0].contains("lamp"));
        assert!(lines.iter().any(|l| l.contains("@PointLightComponent")));
        assert!(lines
            .iter()
            .any(|l| l.contains("radius = 4.0") && l.contains("[0, 1000]")));
    }
}
