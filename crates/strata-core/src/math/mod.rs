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

//! Small linear-algebra vocabulary used by components and resources.
//!
//! The serialized form of every type here is an object with named axes
//! (`{ "x": .., "y": .., "z": .. }`), which is what scene documents store.

pub const EPSILON: f32 = 1e-5;

pub mod geometry;
pub mod pose;
pub mod quaternion;
pub mod vector;

pub use self::geometry::Aabb;
pub use self::pose::Pose;
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec2, Vec3, Vec4};

/// Checks if two floats are approximately equal within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
