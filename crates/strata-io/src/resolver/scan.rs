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

//! The single directory walk of a resolution pass.

use super::{report::Candidates, ResolveError};
use crate::config::ResolverConfig;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A file seen during the walk, with its comparison keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedFile {
    /// The path on disk.
    pub path: PathBuf,
    /// The path relative to the root, `/`-separated, for diagnostics.
    pub display: String,
    /// Lower-cased extension without the dot.
    pub extension: String,
    /// Lower-cased file name without its extension.
    pub stem: String,
}

impl ScannedFile {
    fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let stem = path.file_stem()?.to_str()?.to_lowercase();
        let display = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        Some(Self {
            path,
            display,
            extension,
            stem,
        })
    }
}

/// Files matching a wanted key, grouped by extension class.
#[derive(Debug, Default)]
pub(crate) struct Matches {
    /// Texture key to candidate image files.
    pub textures: Candidates,
    /// Model root to candidate model files.
    pub models: Candidates,
}

impl Matches {
    /// Every key with more than one candidate, with its candidates.
    pub fn ambiguous(&self) -> impl Iterator<Item = (&String, &Vec<PathBuf>)> {
        self.textures
            .iter()
            .chain(self.models.iter())
            .filter(|(_, paths)| paths.len() > 1)
    }
}

/// Walks `root` once, sorted by file name at every level, and collects the
/// candidate files for each wanted texture key and model root.
///
/// Symbolic links are followed. Entries below the root that cannot be read
/// (broken links, denied directories, link cycles) are logged and skipped;
/// only a failure to read the root itself aborts the walk.
pub(crate) fn scan(
    root: &Path,
    config: &ResolverConfig,
    textures: &BTreeSet<String>,
    model_roots: &BTreeSet<String>,
) -> Result<Matches, ResolveError> {
    let is_image = |ext: &str| config.image_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext));
    let is_model = |ext: &str| config.model_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext));

    let mut matches = Matches::default();
    let mut visited = 0usize;
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                log::warn!("[resolver] skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        visited += 1;
        let Some(file) = ScannedFile::new(root, entry.into_path()) else {
            continue;
        };
        let bucket = if is_image(&file.extension) && textures.contains(&file.stem) {
            &mut matches.textures
        } else if is_model(&file.extension) && model_roots.contains(&file.stem) {
            &mut matches.models
        } else {
            continue;
        };
        log::debug!("[resolver] candidate '{}' for '{}'", file.display, file.stem);
        bucket.entry(file.stem).or_default().push(file.path);
    }
    log::debug!("[resolver] walked {} files under '{}'", visited, root.display());
    Ok(matches)
}
