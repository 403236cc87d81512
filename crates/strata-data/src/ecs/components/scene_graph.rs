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

//! Hierarchy and local transform of an entity.

use strata_core::{
    ecs::Entity,
    math::{Pose, Vec3},
};
use strata_macros::{Component, Reflect};

/// The local transform of an entity and its links in the scene graph.
///
/// `parent` and `children` must be kept consistent with each other; use
/// [`TransformSystem`](crate::ecs::systems::TransformSystem) to edit them.
/// `children` is serialized but hidden from editors since it is always
/// derivable from the `parent` links.
#[derive(Debug, Clone, PartialEq, Component, Reflect)]
pub struct SceneGraphComponent {
    /// Pose relative to the parent (or to the world for a root).
    pub local_pose: Pose,
    /// Scale relative to the parent.
    pub local_scale: Vec3,
    /// The parent entity, or [`Entity::INVALID`] for a root.
    pub parent: Entity,
    /// The direct children of this entity.
    #[reflect(hidden)]
    pub children: Vec<Entity>,
}

impl Default for SceneGraphComponent {
    fn default() -> Self {
        Self {
            local_pose: Pose::IDENTITY,
            local_scale: Vec3::ONE,
            parent: Entity::INVALID,
            children: Vec::new(),
        }
    }
}

impl SceneGraphComponent {
    /// Creates a root node with the given local transform.
    pub fn new(local_pose: Pose, local_scale: Vec3) -> Self {
        Self {
            local_pose,
            local_scale,
            ..Default::default()
        }
    }
}

/// The world-space transform of an entity, derived from the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    /// Accumulated pose.
    pub pose: Pose,
    /// Accumulated scale.
    pub scale: Vec3,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl WorldTransform {
    /// Combines this (parent) world transform with a child's local transform.
    pub fn then(&self, local: &SceneGraphComponent) -> WorldTransform {
        WorldTransform {
            pose: self.pose.compose_scaled(self.scale, &local.local_pose),
            scale: self.scale.mul_elem(local.local_scale),
        }
    }
}
