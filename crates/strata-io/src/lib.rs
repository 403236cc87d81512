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

//! # Strata IO
//!
//! Everything that crosses the process boundary: scene documents, material
//! library files, decoding of image and model files, and the asset resolver
//! that matches unresolved handle keys against files on disk.
//!
//! [`SceneContext`] ties these together into the whole-pass operations an
//! editor or command-line tool triggers.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod loaders;
pub mod materials;
pub mod reflect_json;
pub mod resolver;
pub mod scene;

pub use config::{ConfigError, DuplicatePolicy, ResolverConfig, StrataConfig};
pub use context::{ContextError, SceneContext};
pub use loaders::LoadError;
pub use materials::LibraryError;
pub use resolver::{AssetRef, ResolveError, ResolveReport, Resolver};
pub use scene::SceneError;
