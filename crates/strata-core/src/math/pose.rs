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

//! Rigid pose (position plus orientation) and its composition rules.

use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3};

/// A position and orientation in 3D space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation component.
    pub position: Vec3,
    /// Rotation component.
    pub orientation: Quaternion,
}

impl Pose {
    /// The pose at the origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quaternion::IDENTITY,
    };

    /// Creates a pose from its parts.
    pub fn new(position: Vec3, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pose that only translates.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quaternion::IDENTITY)
    }

    /// Transforms a point expressed in this pose's local frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.orientation.rotate_vec3(point)
    }

    /// Composes `self` (the parent) with `local`, scaling the child offset by `parent_scale`.
    ///
    /// The resulting position is `parent.position + parent.orientation * (parent_scale * local.position)`.
    pub fn compose_scaled(&self, parent_scale: Vec3, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(parent_scale.mul_elem(local.position)),
            orientation: (self.orientation * local.orientation).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_scaled_applies_parent_scale_to_offset() {
        let parent = Pose::from_position(Vec3::new(1.0, 0.0, 0.0));
        let child = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        let world = parent.compose_scaled(Vec3::new(2.0, 2.0, 2.0), &child);
        assert_relative_eq!(world.position.x, 1.0);
        assert_relative_eq!(world.position.y, 2.0);
    }
}
