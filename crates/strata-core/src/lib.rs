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

//! # Strata Core
//!
//! Foundational crate containing the identifiers, handles, math primitives and
//! reflection contracts shared by every other Strata crate.
//!
//! Nothing in here knows about concrete component or resource types: those live
//! in `strata-data`. This crate only defines the vocabulary they are written in.

#![warn(missing_docs)]

pub mod asset;
pub mod ecs;
pub mod math;
pub mod reflect;

pub use asset::{Asset, AssetError, AssetHandle, AssetStore, BindOutcome};
pub use ecs::{Entity, EntityOrchestrator, RemapTable, UnmappedEntity};
pub use reflect::{Field, FieldMeta, FieldRange, FieldVisitor, FieldVisitorMut, Reflect};
