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

//! Defines core types related to entities.

use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// An opaque identifier for an entity in an environment.
///
/// An entity carries no payload of its own: it only groups the components that
/// the systems store under its id. Two values are reserved as sentinels and are
/// never issued by the [`EntityOrchestrator`]:
/// - [`Entity::INVALID`] marks "no entity" (e.g. a root node's parent).
/// - [`Entity::ALL`] is a destroy-everything marker, never a real id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    /// The "no entity" sentinel.
    pub const INVALID: Entity = Entity(0);
    /// The "every tracked entity" sentinel, only meaningful for bulk destruction.
    pub const ALL: Entity = Entity(u64::MAX);

    /// Wraps a raw id. No check is performed against the sentinels.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value of this id.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this id is neither [`Entity::INVALID`] nor [`Entity::ALL`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0 && self.0 != Self::ALL.0
    }
}

impl Default for Entity {
    /// Returns [`Entity::INVALID`].
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Entity {
    type Err = ParseIntError;

    /// Parses the decimal form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Issues fresh entity ids.
///
/// Ids start at 1 and are strictly increasing, so an id is never handed out twice
/// for the lifetime of the orchestrator, even after the entity is destroyed.
#[derive(Debug, Clone)]
pub struct EntityOrchestrator {
    next: u64,
}

impl EntityOrchestrator {
    /// Creates an orchestrator whose first issued id is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issues a new, never-before-seen entity id.
    pub fn create_entity(&mut self) -> Entity {
        debug_assert!(self.next < Entity::ALL.0, "entity id space exhausted");
        let entity = Entity(self.next);
        self.next += 1;
        entity
    }

    /// Returns how many ids have been issued so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for EntityOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
