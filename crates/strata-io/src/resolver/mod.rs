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

//! Matches unresolved asset handles against files under an asset root.
//!
//! A pass gathers every unbound key per kind, walks the root directory once,
//! and binds whatever the matching files decode to. Keys without a file stay
//! unbound; that is reported, never raised.

mod report;
mod scan;

pub use report::{AssetRef, LoadFailure, ResolveReport};

use crate::{
    config::{DuplicatePolicy, ResolverConfig},
    loaders::{load_model, AssetLoader, Model, TextureLoader},
};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use strata_core::{
    asset::{Asset, AssetStore, BindOutcome},
    math::{Aabb, EPSILON},
};
use strata_data::{
    assets::{AssetTable, MaterialLibrary, Mesh, TableAsset},
    ecs::Environment,
};
use strata_telemetry::ScopedTimer;
use thiserror::Error;

/// Errors that abort a resolution pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The configured asset root is empty.
    #[error("the asset root path is empty")]
    EmptyPath,
    /// The configured asset root is not a directory.
    #[error("asset root '{0}' is not a directory")]
    MissingRoot(PathBuf),
    /// The directory walk failed.
    #[error("failed to walk the asset root: {0}")]
    Walk(#[from] walkdir::Error),
    /// Several files match one key and the policy forbids picking one.
    #[error("asset key '{key}' matches {} files: {candidates:?}", candidates.len())]
    Ambiguous {
        /// The texture key or model root.
        key: String,
        /// Every matching file, in walk order.
        candidates: Vec<PathBuf>,
    },
}

/// Runs resolution passes with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

/// The part of a mesh or geometry key before the first `/`.
pub fn model_root(key: &str) -> &str {
    key.split_once('/').map_or(key, |(root, _)| root)
}

impl Resolver {
    /// Creates a resolver.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Binds every unresolved handle reachable from `env`, `library` and
    /// `table` for which a matching file exists under the asset root.
    ///
    /// Handles referenced by `env` and `library` are registered in `table`
    /// first, so the table alone describes what is still missing afterwards.
    pub fn resolve(
        &self,
        env: &Environment,
        library: &MaterialLibrary,
        table: &mut AssetTable,
    ) -> Result<ResolveReport, ResolveError> {
        let _timer = ScopedTimer::new("[resolver] resolution pass");
        let root = self.config.asset_root.as_path();
        if root.as_os_str().is_empty() {
            return Err(ResolveError::EmptyPath);
        }
        if !root.is_dir() {
            return Err(ResolveError::MissingRoot(root.to_path_buf()));
        }

        gather(env, library, table);
        let textures: BTreeSet<String> = table.textures.unresolved_keys().map(str::to_owned).collect();
        let model_roots: BTreeSet<String> = table
            .meshes
            .unresolved_keys()
            .chain(table.geometry.unresolved_keys())
            .map(|key| model_root(key).to_owned())
            .collect();
        log::info!(
            "[resolver] looking for {} textures and {} models under '{}'",
            textures.len(),
            model_roots.len(),
            root.display()
        );

        let matches = scan::scan(root, &self.config, &textures, &model_roots)?;

        let mut report = ResolveReport::default();
        for (key, candidates) in matches.ambiguous() {
            if self.config.on_duplicate == DuplicatePolicy::Error {
                return Err(ResolveError::Ambiguous {
                    key: key.clone(),
                    candidates: candidates.clone(),
                });
            }
            log::warn!(
                "[resolver] '{}' matches {} files, using the first: {:?}",
                key,
                candidates.len(),
                candidates
            );
            report.ambiguous.push(key.clone());
        }

        for (key, candidates) in &matches.textures {
            let Some(path) = candidates.first() else {
                continue;
            };
            match TextureLoader.load(path) {
                Ok(texture) => bind(table, key, texture, &mut report),
                Err(err) => fail(root, path, &err, &mut report),
            }
        }

        for (stem, candidates) in &matches.models {
            let Some(path) = candidates.first() else {
                continue;
            };
            match load_model(path) {
                Ok(model) => self.bind_model(table, stem, model, &mut report),
                Err(err) => fail(root, path, &err, &mut report),
            }
        }

        collect_unresolved(&table.textures, &mut report);
        collect_unresolved(&table.meshes, &mut report);
        collect_unresolved(&table.geometry, &mut report);
        collect_unresolved(&table.shaders, &mut report);
        collect_unresolved(&table.materials, &mut report);
        report.unresolved.sort();
        for missing in &report.unresolved {
            log::warn!("[resolver] unresolved {}", missing);
        }

        log::info!(
            "[resolver] resolved {} assets, {} unresolved, {} failed",
            report.resolved.len(),
            report.unresolved.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Binds each sub-mesh as `stem/name`, both as geometry and as a mesh.
    fn bind_model(&self, table: &mut AssetTable, stem: &str, mut model: Model, report: &mut ResolveReport) {
        if let Some(target) = self.config.model_scale {
            rescale(&mut model, target);
        }
        for sub in model.sub_meshes {
            let key = format!("{stem}/{}", sub.name);
            let mut geometry = sub.geometry;
            geometry.compute_normals();
            let mesh = Mesh::from_geometry(&geometry);
            bind(table, &key, geometry, report);
            bind(table, &key, mesh, report);
        }
    }
}

/// Registers every handle the scene and the material library refer to.
fn gather(env: &Environment, library: &MaterialLibrary, table: &mut AssetTable) {
    library.register(table);
    for (_, component) in env.render.meshes.iter() {
        table.meshes.track(&component.mesh);
    }
    for (_, component) in env.render.materials.iter() {
        table.materials.track(&component.material);
    }
    for (_, component) in env.collision.geometry.iter() {
        table.geometry.track(&component.geometry);
    }
}

/// Uniformly scales every sub-mesh so the model's largest extent equals `target`.
fn rescale(model: &mut Model, target: f32) {
    let points = model
        .sub_meshes
        .iter()
        .flat_map(|s| s.geometry.positions.iter().copied());
    let Some(bounds) = Aabb::from_points(points) else {
        return;
    };
    let extent = bounds.size().max_element();
    if extent <= EPSILON {
        return;
    }
    for sub in &mut model.sub_meshes {
        sub.geometry.scale(target / extent);
    }
}

fn bind<T: TableAsset>(table: &mut AssetTable, key: &str, resource: T, report: &mut ResolveReport) {
    match table.bind(key, resource) {
        Ok(BindOutcome::Bound) => {
            log::info!("[resolver] resolved {} ({})", key, T::KIND);
            report.resolved.push(AssetRef::new(T::KIND, key));
        }
        Ok(BindOutcome::AlreadyBound) => {}
        Err(err) => log::error!("[resolver] cannot bind '{}': {}", key, err),
    }
}

fn fail(root: &Path, path: &Path, err: &dyn std::error::Error, report: &mut ResolveReport) {
    let display = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    log::error!("[resolver] failed to load '{}': {}", display, err);
    report.failed.push(LoadFailure {
        path: display,
        reason: err.to_string(),
    });
}

fn collect_unresolved<T: Asset>(store: &AssetStore<T>, report: &mut ResolveReport) {
    report
        .unresolved
        .extend(store.unresolved_keys().map(|key| AssetRef::new(T::KIND, key)));
}

