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

//! Named material instances.

use super::{AssetTable, DefaultMaterial, Material, MaterialKind};
use std::{collections::BTreeMap, sync::Arc};
use strata_core::asset::AssetHandle;

/// The name of the built-in fallback material.
pub const DEFAULT_MATERIAL: &str = "default-material";
/// The shader the built-in fallback material renders with.
pub const DEFAULT_SHADER: &str = "default-shader";

/// The set of material instances a project defines, by name.
///
/// Always contains [`DEFAULT_MATERIAL`], which cannot be removed.
///
/// Each instance is shared with the [`AssetTable`] it is registered into, so a
/// dereferenced material handle and the library entry are the same allocation.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    instances: BTreeMap<String, Arc<Material>>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        let mut instances = BTreeMap::new();
        instances.insert(
            DEFAULT_MATERIAL.to_owned(),
            Arc::new(Material::new(MaterialKind::Default(DefaultMaterial {
                shader: AssetHandle::new(DEFAULT_SHADER),
            }))),
        );
        Self { instances }
    }
}

impl MaterialLibrary {
    /// Creates a library holding only the default material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material named `name`. Returns `None` if the name is taken.
    pub fn create_material(&mut self, name: &str, kind: MaterialKind) -> Option<&mut Material> {
        if self.instances.contains_key(name) {
            log::warn!("[materials] material '{}' already exists", name);
            return None;
        }
        let material = self
            .instances
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(Material::new(kind)));
        Some(Arc::make_mut(material))
    }

    /// Removes and returns the material named `name`.
    ///
    /// The default material is never removed.
    pub fn remove_material(&mut self, name: &str) -> Option<Arc<Material>> {
        if name == DEFAULT_MATERIAL {
            log::warn!("[materials] the default material cannot be removed");
            return None;
        }
        self.instances.remove(name)
    }

    /// Returns the material named `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<Material>> {
        self.instances.get(name)
    }

    /// Returns the material named `name` for editing.
    ///
    /// An instance already registered into a table is copied first; the next
    /// [`MaterialLibrary::register`] hands the edited copy to the table. The
    /// cached shader variant is dropped either way.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Material> {
        let material = Arc::make_mut(self.instances.get_mut(name)?);
        material.clear_variant();
        Some(material)
    }

    /// Iterates `(name, material)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.instances.iter().map(|(n, m)| (n.as_str(), &**m))
    }

    /// The number of materials, including the default one.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Always `false`: the default material is always present.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Binds every material into `table` under its name, and registers the
    /// shader and texture keys each one references.
    ///
    /// The library owns its names: a name bound to anything other than the
    /// library's current instance is rebound to it.
    pub fn register(&self, table: &mut AssetTable) {
        for (name, material) in &self.instances {
            table.shaders.track(material.shader());
            for slot in material.texture_slots() {
                table.textures.track(slot.handle);
            }
            let result = match table.materials.get(name) {
                Some(bound) if Arc::ptr_eq(bound, material) => continue,
                Some(_) => {
                    log::debug!("[materials] rebinding edited material '{}'", name);
                    table.materials.rebind(name, material.clone()).map(|_| ())
                }
                None => table.materials.bind(name, material.clone()).map(|_| ()),
            };
            if let Err(err) = result {
                log::error!("[materials] failed to register '{}': {}", name, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PbrStandardMaterial;

    #[test]
    fn test_default_material_is_permanent() {
        let mut library = MaterialLibrary::new();
        assert!(library.get(DEFAULT_MATERIAL).is_some());
        assert!(library.remove_material(DEFAULT_MATERIAL).is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_create_refuses_duplicate_names() {
        let mut library = MaterialLibrary::new();
        let kind = MaterialKind::PbrStandard(PbrStandardMaterial::default());
        assert!(library.create_material("brick-wall", kind.clone()).is_some());
        assert!(library.create_material("brick-wall", kind).is_none());
        assert!(library.remove_material("brick-wall").is_some());
    }

    #[test]
    fn test_register_binds_materials_and_tracks_references() {
        let mut library = MaterialLibrary::new();
        library.create_material(
            "brick-wall",
            MaterialKind::PbrStandard(PbrStandardMaterial {
                albedo: AssetHandle::new("brick"),
                shader: AssetHandle::new("pbr-forward"),
                ..Default::default()
            }),
        );
        let mut table = AssetTable::new();

        library.register(&mut table);

        assert!(table.is_resolved(&AssetHandle::<Material>::new("brick-wall")));
        assert_eq!(table.textures.unresolved_keys().collect::<Vec<_>>(), vec!["brick"]);
        assert_eq!(
            table.shaders.unresolved_keys().collect::<Vec<_>>(),
            vec![DEFAULT_SHADER, "pbr-forward"]
        );
    }

    #[test]
    fn test_edits_reach_the_table_on_register() {
        // --- 1. ARRANGE ---
        let mut library = MaterialLibrary::new();
        library.create_material(
            "wall",
            MaterialKind::PbrStandard(PbrStandardMaterial::default()),
        );
        let mut table = AssetTable::new();
        library.register(&mut table);
        let handle = AssetHandle::<Material>::new("wall");
        let before = table.dereference(&handle).unwrap().clone();
        assert!(Arc::ptr_eq(&before, library.get("wall").unwrap()));

        // --- 2. ACT ---
        if let MaterialKind::PbrStandard(pbr) = &mut library.get_mut("wall").unwrap().kind {
            pbr.albedo = AssetHandle::new("brick");
        }
        library.register(&mut table);

        // --- 3. ASSERT ---
        let bound = table.dereference(&handle).unwrap();
        assert!(Arc::ptr_eq(bound, library.get("wall").unwrap()));
        assert_eq!(bound.required_defines(), vec!["HAS_ALBEDO_MAP"]);
        assert!(before.required_defines().is_empty(), "earlier readers keep their copy");
        assert_eq!(table.textures.unresolved_keys().collect::<Vec<_>>(), vec!["brick"]);
    }
}
