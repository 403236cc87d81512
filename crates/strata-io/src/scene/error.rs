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

use std::path::PathBuf;
use strata_core::ecs::Entity;
use thiserror::Error;

/// Errors raised while reading or writing scene documents.
#[derive(Debug, Error)]
pub enum SceneError {
    /// An import or export entry point was given an empty path.
    #[error("scene path is empty")]
    EmptyPath,
    /// The document file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The document is not valid JSON.
    #[error("scene document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// A live component could not be encoded.
    #[error("cannot encode scene: {0}")]
    Encode(#[source] serde_json::Error),
    /// The document is JSON but violates the scene layout.
    #[error("malformed scene document at '{key}': {reason}")]
    MalformedDocument {
        /// Location of the problem, as `entity/@Type.field`.
        key: String,
        /// What is wrong.
        reason: String,
    },
    /// The document names a component type this build does not know.
    #[error("entity {entity} uses unknown component type '{type_name}'")]
    UnknownComponentType {
        /// The document-local id of the entity.
        entity: Entity,
        /// The type tag without its prefix.
        type_name: String,
    },
    /// Any of the above, attributed to a document file.
    #[error("{path}: {source}")]
    File {
        /// The document file.
        path: PathBuf,
        /// The underlying error.
        source: Box<SceneError>,
    },
}

impl SceneError {
    /// The innermost error, looking through [`SceneError::File`] wrappers.
    pub fn root(&self) -> &SceneError {
        match self {
            SceneError::File { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SceneError::MalformedDocument {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            err @ SceneError::File { .. } => err,
            err => SceneError::File {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }
}
