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

//! # Strata Data
//!
//! The concrete data model: component types and the systems that store them,
//! the [`ecs::Environment`] that tracks live entities, and the in-memory
//! resources (textures, meshes, shaders, materials) that asset handles resolve to.

#![warn(missing_docs)]

pub mod assets;
pub mod ecs;

pub use assets::{AssetTable, Material, MaterialKind, MaterialLibrary};
pub use ecs::{Component, ComponentStore, Environment, System};
