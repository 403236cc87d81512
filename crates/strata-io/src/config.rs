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

//! The `Strata.toml` manifest and the resolver settings it carries.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// What the resolver does when several files match the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Bind the first candidate in walk order and warn about the others.
    #[default]
    First,
    /// Abort the pass before binding anything.
    Error,
}

/// Settings for one asset resolution pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// The directory walked for asset files.
    pub asset_root: PathBuf,
    /// Lower-case extensions treated as textures.
    pub image_extensions: Vec<String>,
    /// Lower-case extensions treated as models.
    pub model_extensions: Vec<String>,
    /// Tie-break for keys with several candidate files.
    pub on_duplicate: DuplicatePolicy,
    /// When set, models are rescaled so their largest extent equals this value.
    pub model_scale: Option<f32>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            image_extensions: ["png", "tga", "jpg", "jpeg"].map(String::from).to_vec(),
            model_extensions: ["obj", "gltf", "glb"].map(String::from).to_vec(),
            on_duplicate: DuplicatePolicy::First,
            model_scale: None,
        }
    }
}

impl ResolverConfig {
    /// Default settings rooted at `asset_root`.
    pub fn with_root(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            ..Default::default()
        }
    }
}

/// Errors raised while reading the manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The manifest exists but could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// The manifest path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The manifest is not valid TOML for this layout.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The contents of `Strata.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Path of the material library file.
    pub material_library: PathBuf,
    /// The `[resolver]` table.
    pub resolver: ResolverConfig,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            material_library: PathBuf::from("assets/materials/materials.json"),
            resolver: ResolverConfig::default(),
        }
    }
}

impl StrataConfig {
    /// Reads the manifest at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!(
                "[config] no '{}' found, using the default configuration",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}
