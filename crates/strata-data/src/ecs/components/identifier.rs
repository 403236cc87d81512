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

use strata_macros::{Component, Reflect};

/// A human-readable name attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Component, Reflect)]
pub struct IdentifierComponent {
    /// The name shown in editors and used for lookups.
    pub id: String,
}

impl IdentifierComponent {
    /// Creates an identifier with the given name.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
