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

//! Material library files.
//!
//! A library file is a JSON object keyed by material name; each value holds a
//! single `@<MaterialType>` tag mapping to the material's reflected fields.

use crate::{
    reflect_json::{fields_from_json, fields_to_json},
    scene::{to_pretty_string, TYPE_TAG_PREFIX},
};
use serde_json::{Map, Value};
use std::{fs, path::Path, path::PathBuf};
use strata_data::assets::{MaterialKind, MaterialLibrary};
use strata_telemetry::ScopedTimer;
use thiserror::Error;

/// Errors raised while reading or writing material library files.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The file is not valid JSON, or a material could not be encoded.
    #[error("material library is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON does not follow the library layout.
    #[error("malformed material library at '{key}': {reason}")]
    MalformedDocument {
        /// The offending material name or field.
        key: String,
        /// What is wrong.
        reason: String,
    },
    /// A material names a variant this build does not know.
    #[error("material '{name}' uses unknown material type '{type_name}'")]
    UnknownMaterialType {
        /// The material name.
        name: String,
        /// The type tag without its prefix.
        type_name: String,
    },
}

fn malformed(key: impl Into<String>, reason: impl Into<String>) -> LibraryError {
    LibraryError::MalformedDocument {
        key: key.into(),
        reason: reason.into(),
    }
}

/// Encodes every material of `library`.
pub fn export_library(library: &MaterialLibrary) -> Result<Value, LibraryError> {
    let mut document = Map::new();
    for (name, material) in library.iter() {
        let fields = fields_to_json(&material.kind).map_err(|err| malformed(name, err.to_string()))?;
        let mut tagged = Map::new();
        tagged.insert(
            format!("{TYPE_TAG_PREFIX}{}", material.type_name()),
            Value::Object(fields),
        );
        document.insert(name.to_owned(), Value::Object(tagged));
    }
    Ok(Value::Object(document))
}

/// Decodes a library document.
///
/// The result always contains the default material; a document entry with
/// the default material's name replaces its fields.
pub fn import_library(document: &Value) -> Result<MaterialLibrary, LibraryError> {
    let entries = document
        .as_object()
        .ok_or_else(|| malformed("<root>", "expected an object of materials"))?;

    let mut library = MaterialLibrary::new();
    for (name, entry) in entries {
        let tagged = entry
            .as_object()
            .filter(|o| o.len() == 1)
            .ok_or_else(|| malformed(name, "expected exactly one material type tag"))?;
        let Some((tag, fields)) = tagged.iter().next() else {
            continue;
        };
        let type_name = tag
            .strip_prefix(TYPE_TAG_PREFIX)
            .ok_or_else(|| malformed(name, format!("'{tag}' is missing the '{TYPE_TAG_PREFIX}' type tag")))?;
        let mut kind =
            MaterialKind::from_type_name(type_name).ok_or_else(|| LibraryError::UnknownMaterialType {
                name: name.clone(),
                type_name: type_name.to_owned(),
            })?;
        let fields = fields
            .as_object()
            .ok_or_else(|| malformed(name, "expected an object of fields"))?;
        let context = format!("material '{name}'");
        fields_from_json(&mut kind, fields, &context).map_err(|err| malformed(name, err.to_string()))?;

        match library.get_mut(name) {
            Some(existing) => *existing = kind.into(),
            None => {
                library.create_material(name, kind);
            }
        }
    }
    Ok(library)
}

/// Reads the library file at `path`. A missing file yields the default library.
pub fn load_library(path: &Path) -> Result<MaterialLibrary, LibraryError> {
    let _timer = ScopedTimer::new("[materials] load");
    if !path.exists() {
        log::info!(
            "[materials] no library at '{}', using the default library",
            path.display()
        );
        return Ok(MaterialLibrary::new());
    }
    let text = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let library = import_library(&serde_json::from_str(&text)?)?;
    log::info!("[materials] loaded {} materials", library.len());
    Ok(library)
}

/// Writes `library` to `path`, creating parent directories.
pub fn save_library(path: &Path, library: &MaterialLibrary) -> Result<(), LibraryError> {
    let _timer = ScopedTimer::new("[materials] save");
    let text = to_pretty_string(&export_library(library)?)?;
    let io_err = |source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, text).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::asset::AssetHandle;
    use strata_data::assets::{PbrStandardMaterial, DEFAULT_MATERIAL};

    #[test]
    fn test_library_round_trip() {
        let mut library = MaterialLibrary::new();
        library.create_material(
            "brick-wall",
            MaterialKind::PbrStandard(PbrStandardMaterial {
                roughness_factor: 0.8,
                albedo: AssetHandle::new("brick"),
                shader: AssetHandle::new("pbr-forward"),
                ..Default::default()
            }),
        );

        let document = export_library(&library).unwrap();
        assert_eq!(
            document["brick-wall"]["@PbrStandardMaterial"]["albedo_handle"],
            "brick"
        );

        let restored = import_library(&document).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("brick-wall"), library.get("brick-wall"));
        assert_eq!(restored.get(DEFAULT_MATERIAL), library.get(DEFAULT_MATERIAL));
    }

    #[test]
    fn test_unknown_material_type_is_rejected() {
        let document = serde_json::json!({ "odd": { "@ToonMaterial": {} } });
        assert!(matches!(
            import_library(&document),
            Err(LibraryError::UnknownMaterialType { type_name, .. }) if type_name == "ToonMaterial"
        ));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let document = serde_json::json!({ "flat": { "@DefaultMaterial": {} } });
        assert!(matches!(
            import_library(&document),
            Err(LibraryError::MalformedDocument { key, .. }) if key == "flat"
        ));
    }

    #[test]
    fn test_missing_file_yields_default_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = load_library(&dir.path().join("absent.json")).unwrap();
        assert!(library.get(DEFAULT_MATERIAL).is_some());
    }

    #[test]
    fn test_library_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials").join("materials.json");
        let mut library = MaterialLibrary::new();
        library.create_material(
            "glass",
            MaterialKind::PbrStandard(PbrStandardMaterial {
                opacity: 0.25,
                ..Default::default()
            }),
        );

        save_library(&path, &library).unwrap();
        let restored = load_library(&path).unwrap();

        assert_eq!(restored.get("glass"), library.get("glass"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"@PbrStandardMaterial\""));
    }
}
