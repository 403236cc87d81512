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

use strata_core::reflect::Reflect;

/// A trait for types that can be stored as components by a system.
///
/// `TYPE_NAME` is the static type identity written into scene documents
/// (as `@TYPE_NAME`). It is normally provided by `#[derive(Component)]`,
/// which uses the struct name.
///
/// Components are plain data: they are default-constructible so an importer
/// can create one and fill its reflected fields by name, and cloneable so an
/// entity can be duplicated.
pub trait Component: Reflect + Default + Clone + Send + Sync + 'static {
    /// The type tag used in scene documents.
    const TYPE_NAME: &'static str;
}
