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

//! A per-kind, keyed table of lazily bound resources.

use super::{Asset, AssetError, AssetHandle, BindOutcome};
use std::{collections::BTreeMap, sync::Arc};

/// The table mapping handle keys of one resource kind to bound resources.
///
/// Every key that was ever requested through [`AssetStore::get_or_create`]
/// has an entry; the entry stays `None` until a resource is bound. Once bound,
/// [`AssetStore::bind`] never replaces the resource; only an owner that edits
/// its resources in place of files (see [`AssetStore::rebind`]) does.
///
/// Keys are kept sorted so that gathering and reporting are deterministic.
pub struct AssetStore<T: Asset> {
    entries: BTreeMap<Arc<str>, Option<Arc<T>>>,
}

impl<T: Asset> Default for AssetStore<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Asset> AssetStore<T> {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `key`, registering an unresolved entry if it is new.
    ///
    /// The empty key is never registered; it yields the empty handle.
    pub fn get_or_create(&mut self, key: &str) -> AssetHandle<T> {
        if key.is_empty() {
            return AssetHandle::default();
        }
        if let Some((shared, _)) = self.entries.get_key_value(key) {
            return AssetHandle::new(shared.clone());
        }
        let shared: Arc<str> = Arc::from(key);
        self.entries.insert(shared.clone(), None);
        AssetHandle::new(shared)
    }

    /// Registers an unresolved entry for an existing handle's key.
    pub fn track(&mut self, handle: &AssetHandle<T>) {
        if !handle.is_empty() {
            self.entries
                .entry(handle.shared_key().clone())
                .or_insert(None);
        }
    }

    /// Binds `resource` under `key`. The first bind wins.
    ///
    /// Binding an already-bound key leaves the existing resource in place and
    /// returns [`BindOutcome::AlreadyBound`].
    pub fn bind(
        &mut self,
        key: &str,
        resource: impl Into<Arc<T>>,
    ) -> Result<BindOutcome, AssetError> {
        if key.is_empty() {
            return Err(AssetError::EmptyKey { kind: T::KIND });
        }
        match self.entries.get_mut(key) {
            Some(Some(_)) => {
                log::debug!("[assets] {} '{}' already bound, keeping first", T::KIND, key);
                Ok(BindOutcome::AlreadyBound)
            }
            Some(slot) => {
                *slot = Some(resource.into());
                Ok(BindOutcome::Bound)
            }
            None => {
                self.entries.insert(Arc::from(key), Some(resource.into()));
                Ok(BindOutcome::Bound)
            }
        }
    }

    /// Binds `resource` under `key`, replacing whatever was bound before.
    ///
    /// Returns the previous resource. Readers holding the old `Arc` keep it.
    pub fn rebind(
        &mut self,
        key: &str,
        resource: impl Into<Arc<T>>,
    ) -> Result<Option<Arc<T>>, AssetError> {
        if key.is_empty() {
            return Err(AssetError::EmptyKey { kind: T::KIND });
        }
        match self.entries.get_mut(key) {
            Some(slot) => Ok(slot.replace(resource.into())),
            None => {
                self.entries.insert(Arc::from(key), Some(resource.into()));
                Ok(None)
            }
        }
    }

    /// Returns `true` when a resource is bound under the handle's key.
    pub fn is_resolved(&self, handle: &AssetHandle<T>) -> bool {
        matches!(self.entries.get(handle.key()), Some(Some(_)))
    }

    /// Returns the resource bound to the handle.
    ///
    /// An unbound (or unknown, or empty) key is reported as
    /// [`AssetError::Unresolved`].
    pub fn dereference(&self, handle: &AssetHandle<T>) -> Result<&Arc<T>, AssetError> {
        self.get(handle.key()).ok_or_else(|| AssetError::Unresolved {
            kind: T::KIND,
            key: handle.key().to_owned(),
        })
    }

    /// Returns the resource bound under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Iterates every known key in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| &**k)
    }

    /// Iterates keys that have no resource bound yet, in sorted order.
    pub fn unresolved_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| &**k)
    }

    /// Iterates every bound `(key, resource)` pair.
    pub fn iter_resolved(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|r| (&**k, r)))
    }

    /// The number of known keys, bound or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no key is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
