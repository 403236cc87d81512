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

//! The scene graph: local transforms, parent/child links, and derived world transforms.

use crate::ecs::{
    components::{SceneGraphComponent, WorldTransform},
    ComponentStore, Entity, StoreVisitor, StoreVisitorMut, System,
};
use std::collections::{BTreeMap, HashMap, VecDeque};
use strata_core::math::{Pose, Vec3};
use thiserror::Error;

/// Errors raised when editing the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The entity has no scene graph node.
    #[error("entity {0} has no scene graph node")]
    MissingNode(Entity),
    /// An entity cannot be its own parent.
    #[error("entity {0} cannot be parented to itself")]
    SelfParent(Entity),
    /// The link would make an entity its own ancestor.
    #[error("parenting {child} under {parent} would create a cycle")]
    Cycle {
        /// The requested parent.
        parent: Entity,
        /// The requested child.
        child: Entity,
    },
}

/// Owns every entity's scene graph node and caches world transforms.
///
/// World transforms are derived state: they are never serialized and are
/// recomputed by [`System::refresh`]. Every editing method on this type
/// refreshes on its own; direct edits through `scene_graph` need an explicit
/// refresh afterwards.
#[derive(Debug, Default, Clone)]
pub struct TransformSystem {
    /// Scene graph node of each entity.
    pub scene_graph: ComponentStore<SceneGraphComponent>,
    world: HashMap<Entity, WorldTransform>,
}

impl TransformSystem {
    /// Gives `entity` a root scene graph node. Returns `None` if it already has one.
    pub fn create(
        &mut self,
        entity: Entity,
        local_pose: Pose,
        local_scale: Vec3,
    ) -> Option<&mut SceneGraphComponent> {
        if self.scene_graph.contains(entity) {
            return None;
        }
        let parent = WorldTransform::default();
        let node = SceneGraphComponent::new(local_pose, local_scale);
        self.world.insert(entity, parent.then(&node));
        self.scene_graph.insert(entity, node);
        self.scene_graph.get_mut(entity)
    }

    /// Replaces the local transform of `entity`.
    pub fn set_local_transform(
        &mut self,
        entity: Entity,
        local_pose: Pose,
        local_scale: Vec3,
    ) -> Result<(), HierarchyError> {
        let node = self
            .scene_graph
            .get_mut(entity)
            .ok_or(HierarchyError::MissingNode(entity))?;
        node.local_pose = local_pose;
        node.local_scale = local_scale;
        self.refresh();
        Ok(())
    }

    /// Makes `child` a child of `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: Entity, child: Entity) -> Result<(), HierarchyError> {
        if parent == child {
            return Err(HierarchyError::SelfParent(child));
        }
        for entity in [parent, child] {
            if !self.scene_graph.contains(entity) {
                return Err(HierarchyError::MissingNode(entity));
            }
        }
        if self.is_ancestor(child, parent) {
            return Err(HierarchyError::Cycle { parent, child });
        }

        self.unlink_from_parent(child);
        if let Some(node) = self.scene_graph.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.scene_graph.get_mut(parent) {
            node.children.push(child);
        }
        self.refresh();
        Ok(())
    }

    /// Detaches `child` from its parent, turning it into a root.
    pub fn remove_parent(&mut self, child: Entity) -> Result<(), HierarchyError> {
        if !self.scene_graph.contains(child) {
            return Err(HierarchyError::MissingNode(child));
        }
        self.unlink_from_parent(child);
        self.refresh();
        Ok(())
    }

    /// Returns `true` if `ancestor` appears on the parent chain of `entity`.
    pub fn is_ancestor(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = entity;
        // The chain length is bounded by the node count even on corrupted links.
        for _ in 0..=self.scene_graph.len() {
            match self.scene_graph.get(current) {
                Some(node) if node.parent.is_valid() => {
                    if node.parent == ancestor {
                        return true;
                    }
                    current = node.parent;
                }
                _ => return false,
            }
        }
        false
    }

    /// Returns the world transform of `entity` as of the last refresh.
    pub fn world_transform(&self, entity: Entity) -> Option<&WorldTransform> {
        self.world.get(&entity)
    }

    fn detach_node(&mut self, entity: Entity) {
        self.unlink_from_parent(entity);
        if let Some(node) = self.scene_graph.remove(entity) {
            for child in node.children {
                if let Some(child) = self.scene_graph.get_mut(child) {
                    child.parent = Entity::INVALID;
                }
            }
        }
        self.world.remove(&entity);
    }

    fn unlink_from_parent(&mut self, child: Entity) {
        let Some(parent) = self.scene_graph.get(child).map(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.scene_graph.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.scene_graph.get_mut(child) {
            node.parent = Entity::INVALID;
        }
    }
}

impl System for TransformSystem {
    fn visit_stores<V: StoreVisitor>(&self, visitor: &mut V) {
        visitor.visit_store(&self.scene_graph);
    }

    fn visit_stores_mut<V: StoreVisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_store(&mut self.scene_graph);
    }

    /// Removes the node of `entity`, detaching it from its parent and orphaning its children.
    fn destroy(&mut self, entity: Entity) {
        self.detach_node(entity);
        self.refresh();
    }

    /// Removes every node in `entities`, refreshing world transforms once.
    fn destroy_batch(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.detach_node(entity);
        }
        self.refresh();
    }

    /// Copies the local transform of `src` onto `dest` under the same parent.
    ///
    /// Children are not duplicated.
    fn copy(&mut self, src: Entity, dest: Entity) {
        let Some(source) = self.scene_graph.get(src).cloned() else {
            return;
        };
        self.detach_node(dest);
        let parent = source.parent;
        self.scene_graph.insert(
            dest,
            SceneGraphComponent {
                children: Vec::new(),
                ..source
            },
        );
        if let Some(node) = self.scene_graph.get_mut(parent) {
            node.children.push(dest);
        }
        self.refresh();
    }

    /// Recomputes every world transform breadth-first from the roots.
    ///
    /// A node whose parent has no scene graph node is treated as a root.
    fn refresh(&mut self) {
        self.world.clear();

        let mut children_map: BTreeMap<Entity, Vec<Entity>> = BTreeMap::new();
        let mut queue: VecDeque<Entity> = VecDeque::new();
        for (entity, node) in self.scene_graph.iter() {
            if node.parent.is_valid() && self.scene_graph.contains(node.parent) {
                children_map.entry(node.parent).or_default().push(entity);
            } else {
                self.world
                    .insert(entity, WorldTransform::default().then(node));
                queue.push_back(entity);
            }
        }

        while let Some(parent) = queue.pop_front() {
            let Some(children) = children_map.get(&parent) else {
                continue;
            };
            let Some(parent_world) = self.world.get(&parent).copied() else {
                continue;
            };
            for &child in children {
                if let Some(node) = self.scene_graph.get(child) {
                    self.world.insert(child, parent_world.then(node));
                    queue.push_back(child);
                }
            }
        }

        let unreachable = self.scene_graph.len() - self.world.len();
        if unreachable > 0 {
            log::warn!(
                "[transform] {} scene graph node(s) are part of a parent cycle and have no world transform",
                unreachable
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::math::Quaternion;

    fn e(raw: u64) -> Entity {
        Entity::from_raw(raw)
    }

    #[test]
    fn test_world_transform_follows_parent_chain() {
        // --- 1. ARRANGE ---
        let mut system = TransformSystem::default();
        system.create(e(1), Pose::from_position(Vec3::new(10.0, 0.0, 0.0)), Vec3::ONE);
        system.create(e(2), Pose::from_position(Vec3::new(0.0, 2.0, 0.0)), Vec3::ONE);
        system.create(e(3), Pose::from_position(Vec3::new(0.0, 0.0, 1.0)), Vec3::ONE);

        // --- 2. ACT ---
        system.add_child(e(1), e(2)).unwrap();
        system.add_child(e(2), e(3)).unwrap();

        // --- 3. ASSERT ---
        let world = system.world_transform(e(3)).unwrap();
        assert_relative_eq!(world.pose.position.x, 10.0);
        assert_relative_eq!(world.pose.position.y, 2.0);
        assert_relative_eq!(world.pose.position.z, 1.0);
        assert_eq!(system.scene_graph.get(e(1)).unwrap().children, vec![e(2)]);
    }

    #[test]
    fn test_parent_rotation_and_scale_apply_to_child_offset() {
        let mut system = TransformSystem::default();
        let quarter_turn = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        system.create(e(1), Pose::new(Vec3::ZERO, quarter_turn), Vec3::new(2.0, 2.0, 2.0));
        system.create(e(2), Pose::from_position(Vec3::new(1.0, 0.0, 0.0)), Vec3::ONE);
        system.add_child(e(1), e(2)).unwrap();

        let world = system.world_transform(e(2)).unwrap();
        assert_relative_eq!(world.pose.position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(world.pose.position.z, -2.0, epsilon = 1e-5);
        assert_eq!(world.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut system = TransformSystem::default();
        for raw in 1..=3 {
            system.create(e(raw), Pose::IDENTITY, Vec3::ONE);
        }
        system.add_child(e(1), e(2)).unwrap();
        system.add_child(e(2), e(3)).unwrap();

        assert_eq!(
            system.add_child(e(3), e(1)),
            Err(HierarchyError::Cycle {
                parent: e(3),
                child: e(1)
            })
        );
        assert_eq!(system.add_child(e(1), e(1)), Err(HierarchyError::SelfParent(e(1))));
        assert_eq!(system.add_child(e(1), e(9)), Err(HierarchyError::MissingNode(e(9))));
    }

    #[test]
    fn test_batch_destroy_orphans_survivors() {
        // --- 1. ARRANGE ---
        let mut system = TransformSystem::default();
        system.create(e(1), Pose::from_position(Vec3::new(5.0, 0.0, 0.0)), Vec3::ONE);
        system.create(e(2), Pose::IDENTITY, Vec3::ONE);
        system.create(e(3), Pose::from_position(Vec3::new(0.0, 1.0, 0.0)), Vec3::ONE);
        system.add_child(e(1), e(2)).unwrap();
        system.add_child(e(2), e(3)).unwrap();

        // --- 2. ACT ---
        system.destroy_batch(&[e(1), e(2)]);

        // --- 3. ASSERT ---
        assert_eq!(system.scene_graph.len(), 1);
        assert!(system.world_transform(e(1)).is_none());
        assert_eq!(system.scene_graph.get(e(3)).unwrap().parent, Entity::INVALID);
        let world = system.world_transform(e(3)).unwrap();
        assert_relative_eq!(world.pose.position.x, 0.0);
        assert_relative_eq!(world.pose.position.y, 1.0);
    }

    #[test]
    fn test_reparenting_moves_child_between_lists() {
        let mut system = TransformSystem::default();
        for raw in 1..=3 {
            system.create(e(raw), Pose::IDENTITY, Vec3::ONE);
        }
        system.add_child(e(1), e(3)).unwrap();
        system.add_child(e(2), e(3)).unwrap();

        assert!(system.scene_graph.get(e(1)).unwrap().children.is_empty());
        assert_eq!(system.scene_graph.get(e(2)).unwrap().children, vec![e(3)]);

        system.remove_parent(e(3)).unwrap();
        assert_eq!(system.scene_graph.get(e(3)).unwrap().parent, Entity::INVALID);
        assert!(system.scene_graph.get(e(2)).unwrap().children.is_empty());
    }

    #[test]
    fn test_destroy_orphans_children() {
        let mut system = TransformSystem::default();
        system.create(e(1), Pose::from_position(Vec3::new(5.0, 0.0, 0.0)), Vec3::ONE);
        system.create(e(2), Pose::IDENTITY, Vec3::ONE);
        system.add_child(e(1), e(2)).unwrap();

        system.destroy(e(1));

        assert!(system.world_transform(e(1)).is_none());
        assert_eq!(system.scene_graph.get(e(2)).unwrap().parent, Entity::INVALID);
        assert_relative_eq!(system.world_transform(e(2)).unwrap().pose.position.x, 0.0);
    }

    #[test]
    fn test_copy_attaches_under_same_parent_without_children() {
        let mut system = TransformSystem::default();
        for raw in 1..=3 {
            system.create(e(raw), Pose::IDENTITY, Vec3::ONE);
        }
        system.add_child(e(1), e(2)).unwrap();
        system.add_child(e(2), e(3)).unwrap();

        system.copy(e(2), e(4));

        let copy = system.scene_graph.get(e(4)).unwrap();
        assert_eq!(copy.parent, e(1));
        assert!(copy.children.is_empty());
        assert_eq!(system.scene_graph.get(e(1)).unwrap().children, vec![e(2), e(4)]);
    }
}
