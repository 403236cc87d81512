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

//! The environment: the tracked entity list and the fixed set of systems.

use super::{
    systems::{CollisionSystem, IdentifierSystem, RenderSystem, TransformSystem},
    ComponentVisitor, Entity, EntityOrchestrator, System, SystemVisitor, SystemVisitorMut,
};

/// The live scene.
///
/// Holds the ordered list of tracked entities and one instance of every
/// system. [`Environment::visit_systems`] is the only place that lists the
/// systems; everything that needs to touch all of them goes through it.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    /// Entity names.
    pub identifier: IdentifierSystem,
    /// Scene graph and transforms.
    pub transform: TransformSystem,
    /// Meshes, materials and lights.
    pub render: RenderSystem,
    /// CPU geometry for collision.
    pub collision: CollisionSystem,
    active_entities: Vec<Entity>,
}

impl Environment {
    /// Creates an environment with no entities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity` as live and returns it.
    ///
    /// Callers must not track the same entity twice.
    pub fn track(&mut self, entity: Entity) -> Entity {
        debug_assert!(
            !self.active_entities.contains(&entity),
            "entity {entity} is already tracked"
        );
        self.active_entities.push(entity);
        log::debug!("[environment] tracking entity {}", entity);
        entity
    }

    /// Issues a fresh entity from `orchestrator` and tracks it.
    pub fn spawn(&mut self, orchestrator: &mut EntityOrchestrator) -> Entity {
        let entity = orchestrator.create_entity();
        self.track(entity)
    }

    /// The tracked entities, in tracking order.
    pub fn entity_list(&self) -> &[Entity] {
        &self.active_entities
    }

    /// Returns `true` if `entity` is tracked.
    pub fn is_tracked(&self, entity: Entity) -> bool {
        self.active_entities.contains(&entity)
    }

    /// Destroys `entity`, removing it from the tracked list and from every system.
    ///
    /// [`Entity::ALL`] destroys every tracked entity and clears the list.
    /// [`Entity::INVALID`] is ignored.
    pub fn destroy(&mut self, entity: Entity) {
        struct Destroy(Entity);
        impl SystemVisitorMut for Destroy {
            fn visit_system<S: System>(&mut self, _: &'static str, system: &mut S) {
                system.destroy(self.0);
            }
        }

        struct DestroyBatch<'a>(&'a [Entity]);
        impl SystemVisitorMut for DestroyBatch<'_> {
            fn visit_system<S: System>(&mut self, _: &'static str, system: &mut S) {
                system.destroy_batch(self.0);
            }
        }

        if entity == Entity::INVALID {
            return;
        }
        if entity == Entity::ALL {
            let entities = std::mem::take(&mut self.active_entities);
            log::debug!("[environment] destroying all {} entities", entities.len());
            self.visit_systems_mut(&mut DestroyBatch(&entities));
            return;
        }
        self.active_entities.retain(|&e| e != entity);
        self.visit_systems_mut(&mut Destroy(entity));
    }

    /// Clones every component `src` has, in every system, onto `dest`.
    pub fn copy(&mut self, src: Entity, dest: Entity) {
        struct Duplicate {
            src: Entity,
            dest: Entity,
        }
        impl SystemVisitorMut for Duplicate {
            fn visit_system<S: System>(&mut self, _: &'static str, system: &mut S) {
                system.copy(self.src, self.dest);
            }
        }
        self.visit_systems_mut(&mut Duplicate { src, dest });
    }

    /// Visits every system with its name, in a fixed order.
    pub fn visit_systems<V: SystemVisitor>(&self, visitor: &mut V) {
        visitor.visit_system("identifier", &self.identifier);
        visitor.visit_system("transform", &self.transform);
        visitor.visit_system("render", &self.render);
        visitor.visit_system("collision", &self.collision);
    }

    /// Visits every system mutably, in the same order as [`Environment::visit_systems`].
    pub fn visit_systems_mut<V: SystemVisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_system("identifier", &mut self.identifier);
        visitor.visit_system("transform", &mut self.transform);
        visitor.visit_system("render", &mut self.render);
        visitor.visit_system("collision", &mut self.collision);
    }

    /// Visits every component attached to `entity` across all systems.
    pub fn visit_entity_components<V: ComponentVisitor>(&self, entity: Entity, visitor: &mut V) {
        struct Forward<'a, V> {
            entity: Entity,
            visitor: &'a mut V,
        }
        impl<V: ComponentVisitor> SystemVisitor for Forward<'_, V> {
            fn visit_system<S: System>(&mut self, _: &'static str, system: &S) {
                system.visit_components(self.entity, &mut *self.visitor);
            }
        }
        self.visit_systems(&mut Forward { entity, visitor });
    }

    /// Lets every system recompute derived state.
    pub fn refresh(&mut self) {
        struct Refresh;
        impl SystemVisitorMut for Refresh {
            fn visit_system<S: System>(&mut self, _: &'static str, system: &mut S) {
                system.refresh();
            }
        }
        self.visit_systems_mut(&mut Refresh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{
        components::{IdentifierComponent, MeshComponent, SceneGraphComponent},
        Component,
    };
    use strata_core::math::{Pose, Vec3};

    struct TypeNames(Vec<&'static str>);
    impl ComponentVisitor for TypeNames {
        fn visit_component<C: Component>(&mut self, _: Entity, _: &C) {
            self.0.push(C::TYPE_NAME);
        }
    }

    struct SystemNames(Vec<&'static str>);
    impl SystemVisitor for SystemNames {
        fn visit_system<S: System>(&mut self, name: &'static str, _: &S) {
            self.0.push(name);
        }
    }

    fn populated() -> (Environment, EntityOrchestrator, Entity) {
        let mut orchestrator = EntityOrchestrator::new();
        let mut env = Environment::new();
        let robot = env.spawn(&mut orchestrator);
        env.identifier.create(robot, "robot");
        env.transform.create(robot, Pose::IDENTITY, Vec3::ONE);
        env.render.create_mesh(robot, "robot/arm");
        env.render.create_material(robot, "default-material");
        (env, orchestrator, robot)
    }

    #[test]
    fn test_system_visitation_order_is_fixed() {
        let env = Environment::new();
        let mut names = SystemNames(Vec::new());
        env.visit_systems(&mut names);
        assert_eq!(names.0, vec!["identifier", "transform", "render", "collision"]);
    }

    #[test]
    fn test_visit_entity_components_spans_systems() {
        let (env, _, robot) = populated();
        let mut names = TypeNames(Vec::new());
        env.visit_entity_components(robot, &mut names);
        assert_eq!(
            names.0,
            vec![
                IdentifierComponent::TYPE_NAME,
                SceneGraphComponent::TYPE_NAME,
                MeshComponent::TYPE_NAME,
                "MaterialComponent",
            ]
        );
    }

    #[test]
    fn test_destroy_single_entity_removes_everywhere() {
        let (mut env, mut orchestrator, robot) = populated();
        let other = env.spawn(&mut orchestrator);
        env.identifier.create(other, "other");

        env.destroy(robot);

        assert_eq!(env.entity_list(), &[other]);
        assert!(env.identifier.find("robot").is_none());
        assert!(env.render.meshes.get(robot).is_none());
        assert!(env.transform.scene_graph.get(robot).is_none());
        assert!(env.identifier.find("other").is_some());
    }

    #[test]
    fn test_destroy_all_clears_everything() {
        let (mut env, _, _) = populated();
        env.destroy(Entity::ALL);
        assert!(env.entity_list().is_empty());
        assert!(env.render.meshes.is_empty());
        assert!(env.identifier.identifiers.is_empty());
    }

    #[test]
    fn test_destroy_invalid_is_noop() {
        let (mut env, _, robot) = populated();
        env.destroy(Entity::INVALID);
        assert_eq!(env.entity_list(), &[robot]);
    }

    #[test]
    fn test_copy_clones_components_across_systems() {
        let (mut env, mut orchestrator, robot) = populated();
        let clone = env.spawn(&mut orchestrator);

        env.copy(robot, clone);

        assert_eq!(
            env.render.meshes.get(clone).map(|m| m.mesh.key()),
            Some("robot/arm")
        );
        assert_eq!(env.identifier.get(clone), Some("robot"));
        assert!(env.transform.world_transform(clone).is_some());
    }
}
