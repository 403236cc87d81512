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

use super::Asset;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, hash::Hash, marker::PhantomData, sync::Arc};

/// A cheap, typed reference to a keyed asset.
///
/// The handle itself owns no resource: it is only the `(kind, key)` pair, with
/// the kind carried in the type parameter. Resolution goes through an
/// [`AssetStore`](super::AssetStore). Cloning a handle only bumps the reference
/// count of its key.
///
/// A handle serializes as its bare key string. The default handle has an empty
/// key, meaning "no asset assigned".
pub struct AssetHandle<T: Asset> {
    key: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Asset> AssetHandle<T> {
    /// Creates a handle referring to `key`.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self {
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// The key this handle refers to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The shared key, for use as a map key without copying the string.
    pub fn shared_key(&self) -> &Arc<str> {
        &self.key
    }

    /// Returns `true` when no asset is assigned.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Asset> Default for AssetHandle<T> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<T: Asset> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: Asset> Eq for AssetHandle<T> {}

impl<T: Asset> Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T: Asset> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetHandle<{}>({:?})", T::KIND, self.key)
    }
}

impl<T: Asset> From<&str> for AssetHandle<T> {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl<T: Asset> Serialize for AssetHandle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

impl<'de, T: Asset> Deserialize<'de> for AssetHandle<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::new(key))
    }
}
