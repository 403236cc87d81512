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

//! Reading and writing scene document files.

use super::{export_scene, import_scene, SceneError};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::{fs, path::Path};
use strata_data::ecs::{EntityOrchestrator, Environment, RemapTable};

/// Renders `document` as pretty-printed JSON with four-space indentation.
pub fn to_pretty_string(document: &Value) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    document.serialize(&mut Serializer::with_formatter(&mut out, formatter))?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Reads and parses the scene document at `path`.
pub fn read_scene_file(path: &Path) -> Result<Value, SceneError> {
    if path.as_os_str().is_empty() {
        return Err(SceneError::EmptyPath);
    }
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|err| SceneError::Parse(err).in_file(path))
}

/// Imports the scene document at `path` into `env`. See [`import_scene`].
pub fn load_scene(
    path: &Path,
    env: &mut Environment,
    orchestrator: &mut EntityOrchestrator,
) -> Result<RemapTable, SceneError> {
    let document = read_scene_file(path)?;
    import_scene(&document, env, orchestrator).map_err(|err| err.in_file(path))
}

/// Exports `env` and writes the document to `path`, creating parent directories.
pub fn save_scene(path: &Path, env: &Environment) -> Result<(), SceneError> {
    if path.as_os_str().is_empty() {
        return Err(SceneError::EmptyPath);
    }
    let text = to_pretty_string(&export_scene(env)?).map_err(SceneError::Encode)?;
    let io_err = |source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, text).map_err(io_err)?;
    log::info!("[scene] saved '{}'", path.display());
    Ok(())
}
