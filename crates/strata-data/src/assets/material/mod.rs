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

//! Material instances: a closed set of variants and their lazily compiled shader.

mod kinds;

pub use kinds::*;

use crate::assets::{Shader, ShaderVariant};
use std::sync::{Arc, OnceLock};
use strata_core::{
    asset::{Asset, AssetError, AssetHandle, AssetStore},
    reflect::{FieldVisitor, FieldVisitorMut, Reflect},
};

/// The behavior shared by every material variant.
pub trait SurfaceMaterial {
    /// The shader program this material renders with.
    fn shader(&self) -> &AssetHandle<Shader>;

    /// The texture slots of this material, filled or not.
    fn texture_slots(&self) -> Vec<TextureSlot<'_>> {
        Vec::new()
    }
}

macro_rules! material_kinds {
    ($($(#[$doc:meta])* $variant:ident($ty:ident) => $tag:literal),* $(,)?) => {
        /// The closed set of material variants, each carrying its own fields.
        #[derive(Debug, Clone, PartialEq)]
        pub enum MaterialKind {
            $($(#[$doc])* $variant($ty),)*
        }

        impl MaterialKind {
            /// Every variant's type name, in declaration order.
            pub const TYPE_NAMES: &'static [&'static str] = &[$($tag),*];

            /// The type name written into material documents.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $tag,)*
                }
            }

            /// Creates the default-valued variant named `name`.
            pub fn from_type_name(name: &str) -> Option<Self> {
                match name {
                    $($tag => Some(Self::$variant($ty::default())),)*
                    _ => None,
                }
            }

            /// The variant as its shared behavior.
            pub fn as_surface(&self) -> &dyn SurfaceMaterial {
                match self {
                    $(Self::$variant(m) => m,)*
                }
            }
        }

        impl Reflect for MaterialKind {
            fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V) {
                match self {
                    $(Self::$variant(m) => m.visit_fields(visitor),)*
                }
            }

            fn visit_fields_mut<V: FieldVisitorMut>(&mut self, visitor: &mut V) {
                match self {
                    $(Self::$variant(m) => m.visit_fields_mut(visitor),)*
                }
            }
        }
    };
}

material_kinds! {
    /// Flat fallback shading.
    Default(DefaultMaterial) => "DefaultMaterial",
    /// Metallic-roughness PBR.
    PbrStandard(PbrStandardMaterial) => "PbrStandardMaterial",
    /// Blinn-Phong.
    BlinnPhong(BlinnPhongMaterial) => "BlinnPhongMaterial",
    /// Edge rendering.
    Wireframe(WireframeMaterial) => "WireframeMaterial",
    /// Shader-driven effects.
    Fx(FxMaterial) => "FxMaterial",
}

/// A material instance.
///
/// The shader variant is resolved on first use from the shader store and
/// cached; cloning a material drops the cache so the clone can be edited and
/// compiled independently.
#[derive(Debug)]
pub struct Material {
    /// The variant and its fields.
    pub kind: MaterialKind,
    compiled: OnceLock<Arc<ShaderVariant>>,
}

impl Clone for Material {
    fn clone(&self) -> Self {
        Self::new(self.kind.clone())
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Asset for Material {
    const KIND: &'static str = "material";
}

impl From<MaterialKind> for Material {
    fn from(kind: MaterialKind) -> Self {
        Self::new(kind)
    }
}

impl Material {
    /// Wraps a variant in a material with no compiled shader yet.
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            compiled: OnceLock::new(),
        }
    }

    /// The type name of the variant.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The shader program handle.
    pub fn shader(&self) -> &AssetHandle<Shader> {
        self.kind.as_surface().shader()
    }

    /// The texture slots of the variant.
    pub fn texture_slots(&self) -> Vec<TextureSlot<'_>> {
        self.kind.as_surface().texture_slots()
    }

    /// The defines enabled by this material's filled texture slots.
    pub fn required_defines(&self) -> Vec<&'static str> {
        self.texture_slots()
            .into_iter()
            .filter(|slot| !slot.handle.is_empty())
            .map(|slot| slot.define)
            .collect()
    }

    /// Returns the shader variant for this material, fetching it on first use.
    ///
    /// Fails with [`AssetError::Unresolved`] while the shader is unbound; in
    /// that case nothing is cached and a later call may succeed.
    pub fn variant(&self, shaders: &AssetStore<Shader>) -> Result<Arc<ShaderVariant>, AssetError> {
        if let Some(variant) = self.compiled.get() {
            return Ok(variant.clone());
        }
        let shader = shaders.dereference(self.shader())?;
        let variant = shader.variant(&self.required_defines());
        log::debug!(
            "[material] resolved {} variant {} of '{}'",
            self.type_name(),
            variant.id,
            self.shader().key()
        );
        Ok(self.compiled.get_or_init(|| variant).clone())
    }

    /// Drops the cached shader variant, so the next [`Material::variant`] call
    /// fetches one matching the current fields.
    pub fn clear_variant(&mut self) {
        self.compiled = OnceLock::new();
    }

    /// Returns `true` once a shader variant has been fetched.
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }
}
