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

//! The top-level object owning everything a scene session needs.

use crate::{
    resolver::{ResolveError, ResolveReport, Resolver},
    scene::{self, SceneError},
};
use std::path::{Path, PathBuf};
use strata_data::{
    assets::{AssetTable, MaterialLibrary},
    ecs::{Entity, EntityOrchestrator, Environment},
};
use thiserror::Error;

/// Errors raised by [`SceneContext::open_scene`].
#[derive(Debug, Error)]
pub enum ContextError {
    /// The scene document could not be loaded.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// The scene loaded, but the resolution pass was aborted.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Owns the entity orchestrator, the environment, the asset table and the
/// material library, and runs whole-pass operations over them.
///
/// The asset table outlives individual scenes; the environment does not.
#[derive(Default)]
pub struct SceneContext {
    /// Issues entity ids for every scene opened in this context.
    pub orchestrator: EntityOrchestrator,
    /// The live scene.
    pub environment: Environment,
    /// Every loaded resource, by kind and key.
    pub assets: AssetTable,
    /// Named material instances.
    pub materials: MaterialLibrary,
    resolver: Resolver,
    scene_path: Option<PathBuf>,
}

impl SceneContext {
    /// Creates an empty context that resolves assets with `resolver`.
    pub fn new(resolver: Resolver, materials: MaterialLibrary) -> Self {
        Self {
            materials,
            resolver,
            ..Default::default()
        }
    }

    /// The resolver used by [`Self::open_scene`] and [`Self::resolve`].
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The file the current scene was opened from or last saved to.
    pub fn scene_path(&self) -> Option<&Path> {
        self.scene_path.as_deref()
    }

    /// Replaces the live scene with the document at `path`, registers the
    /// material library and resolves every referenced asset.
    ///
    /// A failed import leaves the environment empty.
    pub fn open_scene(&mut self, path: &Path) -> Result<ResolveReport, ContextError> {
        if path.as_os_str().is_empty() {
            return Err(SceneError::EmptyPath.into());
        }
        self.scene_path = None;
        scene::load_scene(path, &mut self.environment, &mut self.orchestrator)?;
        self.scene_path = Some(path.to_path_buf());
        Ok(self.resolve()?)
    }

    /// Registers the material library and runs a resolution pass.
    pub fn resolve(&mut self) -> Result<ResolveReport, ResolveError> {
        self.materials.register(&mut self.assets);
        self.resolver
            .resolve(&self.environment, &self.materials, &mut self.assets)
    }

    /// Writes the live scene to `path`.
    pub fn save_scene(&mut self, path: &Path) -> Result<(), SceneError> {
        scene::save_scene(path, &self.environment)?;
        self.scene_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Destroys every entity, keeping loaded assets and materials.
    pub fn new_scene(&mut self) {
        self.environment.destroy(Entity::ALL);
        self.scene_path = None;
        log::info!("[context] new scene");
    }

    /// Creates a tracked entity carrying a copy of every component of `source`.
    ///
    /// Returns `None` if `source` is not tracked.
    pub fn clone_entity(&mut self, source: Entity) -> Option<Entity> {
        if !self.environment.is_tracked(source) {
            log::warn!("[context] cannot clone untracked entity {}", source);
            return None;
        }
        let copy = self.environment.spawn(&mut self.orchestrator);
        self.environment.copy(source, copy);
        self.environment.refresh();
        Some(copy)
    }

    /// Destroys `entity` in every system.
    pub fn delete_entity(&mut self, entity: Entity) {
        self.environment.destroy(entity);
        self.environment.refresh();
    }
}
