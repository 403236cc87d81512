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

//! The material variants.

use super::SurfaceMaterial;
use crate::assets::{Shader, Texture};
use strata_core::{
    asset::AssetHandle,
    math::{Vec2, Vec3, Vec4},
};
use strata_macros::Reflect;

/// A texture slot of a material: its reflected name, the shader define
/// enabled when it is filled, and the handle itself.
#[derive(Debug, Clone, Copy)]
pub struct TextureSlot<'a> {
    /// The reflected field name.
    pub name: &'static str,
    /// The define that enables sampling this slot.
    pub define: &'static str,
    /// The referenced texture; empty when the slot is unused.
    pub handle: &'a AssetHandle<Texture>,
}

impl<'a> TextureSlot<'a> {
    /// Creates a slot description.
    pub fn new(
        name: &'static str,
        define: &'static str,
        handle: &'a AssetHandle<Texture>,
    ) -> Self {
        Self {
            name,
            define,
            handle,
        }
    }
}

/// The flat-shaded fallback material.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct DefaultMaterial {
    /// Shader program.
    #[reflect(rename = "program_handle", hidden)]
    pub shader: AssetHandle<Shader>,
}

impl SurfaceMaterial for DefaultMaterial {
    fn shader(&self) -> &AssetHandle<Shader> {
        &self.shader
    }
}

/// A material whose shader does all the work (particles, post effects).
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct FxMaterial {
    /// Shader program.
    #[reflect(rename = "program_handle", hidden)]
    pub shader: AssetHandle<Shader>,
}

impl SurfaceMaterial for FxMaterial {
    fn shader(&self) -> &AssetHandle<Shader> {
        &self.shader
    }
}

/// Draws edges in a single translucent color.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct WireframeMaterial {
    /// Line color with alpha.
    pub color: Vec4,
    /// Shader program.
    #[reflect(rename = "program_handle", hidden)]
    pub shader: AssetHandle<Shader>,
}

impl Default for WireframeMaterial {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 0.5),
            shader: AssetHandle::default(),
        }
    }
}

impl SurfaceMaterial for WireframeMaterial {
    fn shader(&self) -> &AssetHandle<Shader> {
        &self.shader
    }
}

/// Classic Blinn-Phong shading.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct BlinnPhongMaterial {
    /// Diffuse color.
    pub diffuse_color: Vec3,
    /// Specular color.
    pub specular_color: Vec3,
    /// Specular exponent.
    pub specular_shininess: f32,
    /// Specular multiplier.
    pub specular_strength: f32,
    /// Texture coordinate multiplier.
    #[reflect(range(min = -16.0, max = 16.0))]
    pub texcoord_scale: Vec2,
    /// Diffuse map.
    #[reflect(rename = "diffuse_handle")]
    pub diffuse: AssetHandle<Texture>,
    /// Normal map.
    #[reflect(rename = "normal_handle")]
    pub normal: AssetHandle<Texture>,
    /// Shader program.
    #[reflect(rename = "program_handle", hidden)]
    pub shader: AssetHandle<Shader>,
}

impl Default for BlinnPhongMaterial {
    fn default() -> Self {
        Self {
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ONE,
            specular_shininess: 32.0,
            specular_strength: 1.0,
            texcoord_scale: Vec2::ONE,
            diffuse: AssetHandle::default(),
            normal: AssetHandle::default(),
            shader: AssetHandle::default(),
        }
    }
}

impl SurfaceMaterial for BlinnPhongMaterial {
    fn shader(&self) -> &AssetHandle<Shader> {
        &self.shader
    }

    fn texture_slots(&self) -> Vec<TextureSlot<'_>> {
        vec![
            TextureSlot::new("diffuse_handle", "HAS_DIFFUSE_MAP", &self.diffuse),
            TextureSlot::new("normal_handle", "HAS_NORMAL_MAP", &self.normal),
        ]
    }
}

/// Physically based metallic-roughness shading.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PbrStandardMaterial {
    /// Base color.
    pub base_albedo: Vec3,
    /// Surface opacity.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub opacity: f32,
    /// Roughness multiplier.
    #[reflect(range(min = 0.04, max = 1.0))]
    pub roughness_factor: f32,
    /// Metalness multiplier.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub metallic_factor: f32,
    /// Emitted color.
    pub base_emissive: Vec3,
    /// Emission multiplier.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub emissive_strength: f32,
    /// Specular reflectance at normal incidence.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub specular_level: f32,
    /// Ambient occlusion multiplier.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub occlusion_strength: f32,
    /// Ambient light multiplier.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub ambient_strength: f32,
    /// Opacity of received shadows.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub shadow_opacity: f32,
    /// Texture coordinate multiplier.
    #[reflect(range(min = -16.0, max = 16.0))]
    pub texcoord_scale: Vec2,
    /// Albedo map.
    #[reflect(rename = "albedo_handle")]
    pub albedo: AssetHandle<Texture>,
    /// Normal map.
    #[reflect(rename = "normal_handle")]
    pub normal: AssetHandle<Texture>,
    /// Metalness map.
    #[reflect(rename = "metallic_handle")]
    pub metallic: AssetHandle<Texture>,
    /// Roughness map.
    #[reflect(rename = "roughness_handle")]
    pub roughness: AssetHandle<Texture>,
    /// Emission map.
    #[reflect(rename = "emissive_handle")]
    pub emissive: AssetHandle<Texture>,
    /// Height map.
    #[reflect(rename = "height_handle")]
    pub height: AssetHandle<Texture>,
    /// Ambient occlusion map.
    #[reflect(rename = "occlusion_handle")]
    pub occlusion: AssetHandle<Texture>,
    /// Shader program.
    #[reflect(rename = "program_handle", hidden)]
    pub shader: AssetHandle<Shader>,
}

impl Default for PbrStandardMaterial {
    fn default() -> Self {
        Self {
            base_albedo: Vec3::ONE,
            opacity: 1.0,
            roughness_factor: 0.04,
            metallic_factor: 1.0,
            base_emissive: Vec3::ZERO,
            emissive_strength: 1.0,
            specular_level: 0.01,
            occlusion_strength: 1.0,
            ambient_strength: 1.0,
            shadow_opacity: 1.0,
            texcoord_scale: Vec2::ONE,
            albedo: AssetHandle::default(),
            normal: AssetHandle::default(),
            metallic: AssetHandle::default(),
            roughness: AssetHandle::default(),
            emissive: AssetHandle::default(),
            height: AssetHandle::default(),
            occlusion: AssetHandle::default(),
            shader: AssetHandle::default(),
        }
    }
}

impl SurfaceMaterial for PbrStandardMaterial {
    fn shader(&self) -> &AssetHandle<Shader> {
        &self.shader
    }

    fn texture_slots(&self) -> Vec<TextureSlot<'_>> {
        let slot = TextureSlot::new;
        vec![
            slot("albedo_handle", "HAS_ALBEDO_MAP", &self.albedo),
            slot("normal_handle", "HAS_NORMAL_MAP", &self.normal),
            slot("roughness_handle", "HAS_ROUGHNESS_MAP", &self.roughness),
            slot("metallic_handle", "HAS_METALNESS_MAP", &self.metallic),
            slot("emissive_handle", "HAS_EMISSIVE_MAP", &self.emissive),
            slot("height_handle", "HAS_HEIGHT_MAP", &self.height),
            slot("occlusion_handle", "HAS_OCCLUSION_MAP", &self.occlusion),
        ]
    }
}
