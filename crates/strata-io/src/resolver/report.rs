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

//! The outcome of a resolution pass.

use std::{fmt, path::PathBuf};

/// A `(kind, key)` pair naming one asset table entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetRef {
    /// The asset kind, e.g. `"texture"`.
    pub kind: &'static str,
    /// The handle key.
    pub key: String,
}

impl AssetRef {
    pub(crate) fn new(kind: &'static str, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.kind)
    }
}

/// A matched file that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// The file, relative to the asset root with `/` separators.
    pub path: String,
    /// The loader's error message.
    pub reason: String,
}

/// Everything a resolution pass did, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Entries bound by this pass, including sub-meshes nobody asked for.
    pub resolved: Vec<AssetRef>,
    /// Entries still unbound after the pass, sorted by kind then key.
    pub unresolved: Vec<AssetRef>,
    /// Matched files that failed to load.
    pub failed: Vec<LoadFailure>,
    /// Keys that had more than one candidate file.
    pub ambiguous: Vec<String>,
}

impl ResolveReport {
    /// Returns `true` when nothing is left unbound and no load failed.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.failed.is_empty()
    }

    /// Returns `true` when the pass bound `key` as `kind`.
    pub fn was_resolved(&self, kind: &str, key: &str) -> bool {
        self.resolved.iter().any(|r| r.kind == kind && r.key == key)
    }

    /// Returns `true` when `key` of `kind` is still unbound.
    pub fn is_unresolved(&self, kind: &str, key: &str) -> bool {
        self.unresolved.iter().any(|r| r.kind == kind && r.key == key)
    }
}

/// Candidate files collected per key, in walk order.
pub(crate) type Candidates = std::collections::BTreeMap<String, Vec<PathBuf>>;
