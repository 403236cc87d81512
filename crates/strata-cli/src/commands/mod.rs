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


mod inspect;

pub use inspect::inspect;

use crate::helpers::*;
use anyhow::{Context, Result};
use std::path::Path;
use strata_data::ecs::{EntityOrchestrator, Environment};
use strata_io::{
    materials::load_library,
    scene::{load_scene, save_scene},
    Resolver, SceneContext, StrataConfig,
};

/// Opens `scene` in a full context and reports what resolved.
pub fn open(config: &StrataConfig, scene: &Path) -> Result<()> {
    print_task_start("Opening Scene", CYAN);

    let materials = load_library(&config.material_library).with_context(|| {
        format!(
            "Failed to load material library '{}'",
            config.material_library.display()
        )
    })?;
    let mut context = SceneContext::new(Resolver::new(config.resolver.clone()), materials);
    let report = context
        .open_scene(scene)
        .with_context(|| format!("Failed to open scene '{}'", scene.display()))?;

    println!(
        "{}Entities:{} {}   {}Materials:{} {}",
        BOLD,
        RESET,
        context.environment.entity_list().len(),
        BOLD,
        RESET,
        context.materials.len()
    );
    println!(
        "{}Resolved:{} {} assets from '{}'",
        BOLD,
        RESET,
        report.resolved.len(),
        config.resolver.asset_root.display()
    );
    for key in &report.ambiguous {
        print_warning(&format!("'{key}' matched several files"));
    }
    for failure in &report.failed {
        print_error(&format!("{}: {}", failure.path, failure.reason));
    }
    for missing in &report.unresolved {
        print_warning(&format!("unresolved {missing}"));
    }

    if report.is_complete() {
        print_success("Every asset resolved.");
    } else {
        print_warning(&format!(
            "{} unresolved, {} failed to load.",
            report.unresolved.len(),
            report.failed.len()
        ));
    }
    Ok(())
}

/// Loads `input` and writes it to `output`.
pub fn resave(input: &Path, output: &Path) -> Result<()> {
    print_task_start("Re-saving Scene", MAGENTA);

    let mut env = Environment::new();
    let remap = load_scene(input, &mut env, &mut EntityOrchestrator::new())
        .with_context(|| format!("Failed to load scene '{}'", input.display()))?;
    save_scene(output, &env)
        .with_context(|| format!("Failed to write scene '{}'", output.display()))?;

    print_success(&format!(
        "{} entities written to '{}'.",
        remap.len(),
        output.display()
    ));
    Ok(())
}

/// Writes a scene with no entities to `output`.
pub fn new_scene(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!("'{}' already exists", output.display());
    }
    save_scene(output, &Environment::new())
        .with_context(|| format!("Failed to write scene '{}'", output.display()))?;
    print_success(&format!("Created '{}'.", output.display()));
    Ok(())
}
