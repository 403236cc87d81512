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

//! Shader programs and their lazily fetched variants.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};
use strata_core::asset::Asset;

/// One compiled permutation of a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderVariant {
    /// Identifier of the variant within its shader.
    pub id: u32,
    /// The sorted preprocessor defines this variant was built with.
    pub defines: Vec<String>,
}

impl ShaderVariant {
    /// Returns `true` if the variant was built with `define`.
    pub fn enabled(&self, define: &str) -> bool {
        self.defines.iter().any(|d| d == define)
    }
}

/// A shader program bound by the host renderer.
///
/// Variants are created the first time a define set is requested and cached
/// for the lifetime of the shader.
#[derive(Debug, Default)]
pub struct Shader {
    variants: Mutex<BTreeMap<Vec<String>, Arc<ShaderVariant>>>,
}

impl Asset for Shader {
    const KIND: &'static str = "shader";
}

impl Shader {
    /// Creates a shader with no variants yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variant for `defines`, creating it on first request.
    ///
    /// Define order and duplicates do not matter.
    pub fn variant(&self, defines: &[&str]) -> Arc<ShaderVariant> {
        let mut key: Vec<String> = defines.iter().map(|d| (*d).to_owned()).collect();
        key.sort();
        key.dedup();

        let mut variants = self.variants.lock().unwrap_or_else(PoisonError::into_inner);
        let next_id = variants.len() as u32;
        variants
            .entry(key)
            .or_insert_with_key(|defines| {
                log::debug!("[shader] building variant {} with {:?}", next_id, defines);
                Arc::new(ShaderVariant {
                    id: next_id,
                    defines: defines.clone(),
                })
            })
            .clone()
    }

    /// The number of variants built so far.
    pub fn variant_count(&self) -> usize {
        self.variants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
