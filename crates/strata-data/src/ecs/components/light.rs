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

//! Defines the light components.

use strata_core::math::Vec3;
use strata_macros::{Component, Reflect};

/// An omnidirectional light with a finite radius of influence.
#[derive(Debug, Clone, PartialEq, Component, Reflect)]
pub struct PointLightComponent {
    /// Whether the light is currently active.
    pub enabled: bool,
    /// World-space position of the light.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Distance at which the light's contribution reaches zero.
    #[reflect(range(min = 0.0, max = 1000.0))]
    pub radius: f32,
}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            position: Vec3::ZERO,
            color: Vec3::ONE,
            radius: 4.0,
        }
    }
}

/// A light infinitely far away, such as the sun.
#[derive(Debug, Clone, PartialEq, Component, Reflect)]
pub struct DirectionalLightComponent {
    /// Whether the light is currently active.
    pub enabled: bool,
    /// The direction the light travels in.
    pub direction: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    #[reflect(range(min = 0.0, max = 1.0))]
    pub amount: f32,
}

impl Default for DirectionalLightComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            amount: 1.0,
        }
    }
}
