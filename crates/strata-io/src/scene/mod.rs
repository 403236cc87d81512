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

//! Scene documents.
//!
//! A scene document is a JSON object keyed by document-local entity id. Each
//! entity maps `@<ComponentType>` tags to an object of reflected fields:
//!
//! ```json
//! {
//!     "1": {
//!         "@IdentifierComponent": { "id": "robot" },
//!         "@SceneGraphComponent": { "local_pose": { ... }, "parent": 0, ... }
//!     }
//! }
//! ```
//!
//! Ids in a document are only meaningful inside that document: importing
//! issues fresh ids and rewrites every entity reference through a
//! [`RemapTable`](strata_core::ecs::RemapTable).

mod error;
mod export;
mod file;
mod import;

pub use error::*;
pub use export::*;
pub use file::*;
pub use import::*;

/// The prefix that marks a component type tag.
pub const TYPE_TAG_PREFIX: char = '@';
