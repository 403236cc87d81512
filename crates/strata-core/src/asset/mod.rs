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

//! Provides the foundational traits and primitive types for Strata's asset system.
//!
//! Assets are referenced indirectly: a component or material stores an
//! [`AssetHandle`] that carries only a string key, and an [`AssetStore`] per
//! resource kind maps that key to a resource once one has been bound. A handle
//! can therefore be deserialized, cloned and compared long before anything on
//! disk has been loaded for it.

mod handle;
mod store;

pub use handle::*;
pub use store::*;

use thiserror::Error;

/// A marker trait for types that can be managed by the asset system.
///
/// `KIND` is the human-readable resource kind used in diagnostics
/// (`"texture"`, `"mesh"`, ...).
pub trait Asset: Send + Sync + 'static {
    /// The resource kind this asset type belongs to.
    const KIND: &'static str;
}

/// Errors raised by the asset handle table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// A handle was dereferenced before any resource was bound to its key.
    #[error("{kind} '{key}' is not resolved")]
    Unresolved {
        /// The resource kind of the handle.
        kind: &'static str,
        /// The handle key.
        key: String,
    },
    /// An empty key cannot carry a resource.
    #[error("cannot bind a {kind} to an empty key")]
    EmptyKey {
        /// The resource kind of the handle.
        kind: &'static str,
    },
}

/// The result of a successful [`AssetStore::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The key was unresolved and now holds the given resource.
    Bound,
    /// The key already held a resource; the new one was discarded.
    AlreadyBound,
}
