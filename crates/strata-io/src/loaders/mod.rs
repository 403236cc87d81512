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

//! Decoders that turn files on disk into CPU-side assets.

mod gltf;
mod obj;
mod texture;

pub use self::gltf::GltfLoader;
pub use obj::ObjLoader;
pub use texture::TextureLoader;

use std::path::{Path, PathBuf};
use strata_data::assets::Geometry;
use thiserror::Error;

/// Errors raised while decoding an asset file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The image decoder rejected the data.
    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),
    /// The OBJ parser rejected the data.
    #[error("OBJ parsing failed: {0}")]
    Obj(#[from] tobj::LoadError),
    /// The glTF importer rejected the data.
    #[error("glTF import failed: {0}")]
    Gltf(#[from] ::gltf::Error),
    /// The file decoded fine but holds nothing usable.
    #[error("no usable geometry in file")]
    Empty,
    /// No loader handles this file extension.
    #[error("unsupported file extension '{0}'")]
    Unsupported(String),
}

/// A decoder for one asset type.
pub trait AssetLoader<A> {
    /// Decodes an asset from an in-memory file.
    fn load_bytes(&self, bytes: &[u8]) -> Result<A, LoadError>;

    /// Reads and decodes the file at `path`.
    fn load(&self, path: &Path) -> Result<A, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes)
    }
}

/// One named part of a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh {
    /// The name the file gives this part.
    pub name: String,
    /// The part's triangles.
    pub geometry: Geometry,
}

/// Every named part of a model file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// The parts.
    pub sub_meshes: Vec<SubMesh>,
}

impl Model {
    /// Adds `geometry` under `name`, merging it into an existing part of the same name.
    pub fn push(&mut self, name: &str, geometry: Geometry) {
        match self.sub_meshes.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.geometry.append(&geometry),
            None => self.sub_meshes.push(SubMesh {
                name: name.to_owned(),
                geometry,
            }),
        }
    }

    /// Looks up a part by name.
    pub fn get(&self, name: &str) -> Option<&SubMesh> {
        self.sub_meshes.iter().find(|s| s.name == name)
    }
}

/// Decodes a model file, picking the loader by extension.
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "obj" => ObjLoader.load(path),
        "gltf" | "glb" => GltfLoader.load(path),
        _ => Err(LoadError::Unsupported(extension)),
    }
}
