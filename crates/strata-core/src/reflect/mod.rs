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

//! The field-reflection contract.
//!
//! A [`Reflect`] type enumerates its named fields to a visitor, once by shared
//! reference and once by mutable reference. Serialization, import, entity
//! remapping and editor inspection are all written as visitors, so adding a
//! component type never requires touching any of them: deriving `Reflect` is
//! enough.
//!
//! Field names are stable identifiers; they do not depend on declaration order.

mod field;

pub use field::*;

use crate::ecs::{RemapTable, UnmappedEntity};

/// An inclusive numeric range an editor should clamp a field to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

/// Per-field metadata attached by `#[reflect(...)]` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldMeta {
    /// The field is serialized but should not be shown in an editor.
    pub hidden: bool,
    /// Optional editing range for numeric fields.
    pub range: Option<FieldRange>,
}

impl FieldMeta {
    /// Metadata for a plain, visible, unbounded field.
    pub const NONE: FieldMeta = FieldMeta {
        hidden: false,
        range: None,
    };
}

/// Receives each field of a [`Reflect`] value by shared reference.
pub trait FieldVisitor {
    /// Called once per reflected field, in reflection order.
    fn visit_field<F: Field>(&mut self, name: &'static str, value: &F, meta: &FieldMeta);
}

/// Receives each field of a [`Reflect`] value by mutable reference.
pub trait FieldVisitorMut {
    /// Called once per reflected field, in reflection order.
    fn visit_field<F: Field>(&mut self, name: &'static str, value: &mut F, meta: &FieldMeta);
}

/// A type whose named fields can be enumerated generically.
///
/// Usually implemented with `#[derive(Reflect)]` from `strata-macros`.
pub trait Reflect {
    /// Visits every reflected field by shared reference.
    fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V);

    /// Visits every reflected field by mutable reference.
    fn visit_fields_mut<V: FieldVisitorMut>(&mut self, visitor: &mut V);
}

/// Returns the reflected field names of `value`, in reflection order.
pub fn field_names<R: Reflect>(value: &R) -> Vec<&'static str> {
    struct Names(Vec<&'static str>);
    impl FieldVisitor for Names {
        fn visit_field<F: Field>(&mut self, name: &'static str, _: &F, _: &FieldMeta) {
            self.0.push(name);
        }
    }
    let mut names = Names(Vec::new());
    value.visit_fields(&mut names);
    names.0
}

/// Rewrites every entity reference held in `value`'s fields through `table`.
///
/// Stops at the first reference that has no counterpart in the table.
pub fn remap_fields<R: Reflect>(value: &mut R, table: &RemapTable) -> Result<(), UnmappedEntity> {
    struct Remapper<'a> {
        table: &'a RemapTable,
        result: Result<(), UnmappedEntity>,
    }
    impl FieldVisitorMut for Remapper<'_> {
        fn visit_field<F: Field>(&mut self, _: &'static str, value: &mut F, _: &FieldMeta) {
            if self.result.is_ok() {
                self.result = value.remap_entities(self.table);
            }
        }
    }
    let mut remapper = Remapper {
        table,
        result: Ok(()),
    };
    value.visit_fields_mut(&mut remapper);
    remapper.result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;

    #[derive(Default)]
    struct Link {
        target: Entity,
        weight: f32,
        others: Vec<Entity>,
    }

    impl Reflect for Link {
        fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V) {
            visitor.visit_field("target", &self.target, &FieldMeta::NONE);
            visitor.visit_field(
                "weight",
                &self.weight,
                &FieldMeta {
                    hidden: false,
                    range: Some(FieldRange { min: 0.0, max: 1.0 }),
                },
            );
            visitor.visit_field("others", &self.others, &FieldMeta::NONE);
        }

        fn visit_fields_mut<V: FieldVisitorMut>(&mut self, visitor: &mut V) {
            visitor.visit_field("target", &mut self.target, &FieldMeta::NONE);
            visitor.visit_field("weight", &mut self.weight, &FieldMeta::NONE);
            visitor.visit_field("others", &mut self.others, &FieldMeta::NONE);
        }
    }

    #[test]
    fn test_field_names_follow_reflection_order() {
        assert_eq!(
            field_names(&Link::default()),
            vec!["target", "weight", "others"]
        );
    }

    #[test]
    fn test_remap_fields_rewrites_nested_references() {
        let mut table = RemapTable::new();
        table.insert(Entity::from_raw(1), Entity::from_raw(10));
        table.insert(Entity::from_raw(2), Entity::from_raw(20));

        let mut link = Link {
            target: Entity::from_raw(1),
            weight: 0.5,
            others: vec![Entity::from_raw(2), Entity::INVALID],
        };
        remap_fields(&mut link, &table).unwrap();

        assert_eq!(link.target, Entity::from_raw(10));
        assert_eq!(link.others, vec![Entity::from_raw(20), Entity::INVALID]);
    }

    #[test]
    fn test_remap_fields_reports_dangling_reference() {
        let table = RemapTable::new();
        let mut link = Link {
            target: Entity::from_raw(9),
            ..Default::default()
        };
        assert_eq!(
            remap_fields(&mut link, &table),
            Err(UnmappedEntity(Entity::from_raw(9)))
        );
    }
}
