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

//! Bounding volumes.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// The minimum corner.
    pub min: Vec3,
    /// The maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any point will expand.
    pub const INVALID: Self = Self {
        min: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
        max: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
    };

    /// Builds the smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut aabb = Self::INVALID;
        let mut any = false;
        for p in points {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
            any = true;
        }
        any.then_some(aabb)
    }

    /// The center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The full extent of the box along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
        let aabb = Aabb::from_points([Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, -2.0)]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.5, 0.0));
    }
}
