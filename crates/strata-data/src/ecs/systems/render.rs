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

//! Stores everything the renderer consumes, and assembles per-entity views of it.

use crate::ecs::{
    components::{
        DirectionalLightComponent, MaterialComponent, MeshComponent, PointLightComponent,
        SceneGraphComponent, WorldTransform,
    },
    ComponentStore, Entity, Environment, StoreVisitor, StoreVisitorMut, System,
};

/// Stores meshes, materials and lights.
#[derive(Debug, Default, Clone)]
pub struct RenderSystem {
    /// Mesh attached to each renderable entity.
    pub meshes: ComponentStore<MeshComponent>,
    /// Material attached to each renderable entity.
    pub materials: ComponentStore<MaterialComponent>,
    /// Point lights.
    pub point_lights: ComponentStore<PointLightComponent>,
    /// Directional lights.
    pub directional_lights: ComponentStore<DirectionalLightComponent>,
}

impl RenderSystem {
    /// Attaches mesh `key` to `entity`. Returns `None` if it already has one.
    pub fn create_mesh(&mut self, entity: Entity, key: &str) -> Option<&mut MeshComponent> {
        let component = self.meshes.create(entity)?;
        *component = MeshComponent::new(key);
        Some(component)
    }

    /// Attaches material `key` to `entity`. Returns `None` if it already has one.
    pub fn create_material(&mut self, entity: Entity, key: &str) -> Option<&mut MaterialComponent> {
        let component = self.materials.create(entity)?;
        *component = MaterialComponent::new(key);
        Some(component)
    }
}

impl System for RenderSystem {
    fn visit_stores<V: StoreVisitor>(&self, visitor: &mut V) {
        visitor.visit_store(&self.meshes);
        visitor.visit_store(&self.materials);
        visitor.visit_store(&self.point_lights);
        visitor.visit_store(&self.directional_lights);
    }

    fn visit_stores_mut<V: StoreVisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_store(&mut self.meshes);
        visitor.visit_store(&mut self.materials);
        visitor.visit_store(&mut self.point_lights);
        visitor.visit_store(&mut self.directional_lights);
    }
}

/// Everything the renderer needs to draw one entity, borrowed from an environment.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    /// The entity being drawn.
    pub entity: Entity,
    /// Its mesh.
    pub mesh: &'a MeshComponent,
    /// Its material, if it has one; renderers fall back to the default material.
    pub material: Option<&'a MaterialComponent>,
    /// Its local transform and hierarchy links, if it has any.
    pub local: Option<&'a SceneGraphComponent>,
    /// Its world transform; identity when it has no scene graph node.
    pub world: WorldTransform,
}

/// Gathers the render-relevant components of `entity`.
///
/// Returns `None` for entities without a mesh.
pub fn assemble_render_view(env: &Environment, entity: Entity) -> Option<RenderView<'_>> {
    let mesh = env.render.meshes.get(entity)?;
    Some(RenderView {
        entity,
        mesh,
        material: env.render.materials.get(entity),
        local: env.transform.scene_graph.get(entity),
        world: env
            .transform
            .world_transform(entity)
            .copied()
            .unwrap_or_default(),
    })
}
