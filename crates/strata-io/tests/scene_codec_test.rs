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


use anyhow::Result;
use serde_json::json;
use strata_core::math::{Pose, Quaternion, Vec3};
use strata_data::ecs::{
    components::{
        DirectionalLightComponent, GeometryComponent, IdentifierComponent, MaterialComponent,
        MeshComponent, PointLightComponent, SceneGraphComponent,
    },
    Entity, EntityOrchestrator, Environment,
};
use strata_io::scene::{export_scene, import_scene, load_scene, save_scene, SceneError};
use tempfile::tempdir;

/// A small vehicle: a chassis with two wheels, a light, and a floor.
///
/// The front wheel is spawned before the chassis, so its parent reference
/// points forward in document order.
fn build_scene(orchestrator: &mut EntityOrchestrator) -> Environment {
    let mut env = Environment::new();
    let front_wheel = env.spawn(orchestrator);
    let chassis = env.spawn(orchestrator);
    let rear_wheel = env.spawn(orchestrator);
    let lamp = env.spawn(orchestrator);
    let floor = env.spawn(orchestrator);

    env.identifier.create(chassis, "chassis");
    env.identifier.create(front_wheel, "front-wheel");
    env.identifier.create(rear_wheel, "rear-wheel");
    env.identifier.create(lamp, "lamp");

    let turned = Pose::new(
        Vec3::new(0.0, 1.0, 0.0),
        Quaternion::from_axis_angle(Vec3::Y, 0.5),
    );
    env.transform.create(chassis, turned, Vec3::new(2.0, 1.0, 1.0));
    for (wheel, x) in [(front_wheel, 1.5), (rear_wheel, -1.5)] {
        env.transform
            .create(wheel, Pose::from_position(Vec3::new(x, -0.5, 0.0)), Vec3::ONE);
        env.transform.add_child(chassis, wheel).unwrap();
    }

    for (entity, key) in [
        (chassis, "car/body"),
        (front_wheel, "car/wheel"),
        (rear_wheel, "car/wheel"),
    ] {
        env.render.create_mesh(entity, key);
        env.render.create_material(entity, "painted-metal");
        env.collision.create(entity, key);
    }
    env.render.materials.get_mut(rear_wheel).unwrap().cast_shadow = false;

    env.render.point_lights.insert(
        lamp,
        PointLightComponent {
            position: Vec3::new(0.0, 3.0, 0.0),
            color: Vec3::new(1.0, 0.9, 0.7),
            radius: 12.5,
            ..Default::default()
        },
    );
    env.render.directional_lights.insert(
        floor,
        DirectionalLightComponent {
            enabled: false,
            amount: 0.25,
            ..Default::default()
        },
    );

    env.refresh();
    env
}

#[test]
fn test_round_trip_reproduces_every_component() -> Result<()> {
    // --- 1. ARRANGE ---
    let mut orchestrator = EntityOrchestrator::new();
    let original = build_scene(&mut orchestrator);
    let document = export_scene(&original)?;

    // --- 2. ACT ---
    // A fresh orchestrator that has already issued ids forces renumbering.
    let mut other_orchestrator = EntityOrchestrator::new();
    for _ in 0..100 {
        other_orchestrator.create_entity();
    }
    let mut restored = Environment::new();
    let table = import_scene(&document, &mut restored, &mut other_orchestrator)?;

    // --- 3. ASSERT ---
    assert_eq!(restored.entity_list().len(), original.entity_list().len());
    for &old in original.entity_list() {
        let new = table.get(old).expect("every document entity is remapped");
        assert_ne!(old, new, "ids should have been renumbered");
        let remap = |e: Entity| if e.is_valid() { table.get(e).unwrap() } else { e };

        assert_eq!(
            restored.identifier.identifiers.get(new),
            original.identifier.identifiers.get(old)
        );
        assert_eq!(restored.render.meshes.get(new), original.render.meshes.get(old));
        assert_eq!(restored.render.materials.get(new), original.render.materials.get(old));
        assert_eq!(
            restored.render.point_lights.get(new),
            original.render.point_lights.get(old)
        );
        assert_eq!(
            restored.render.directional_lights.get(new),
            original.render.directional_lights.get(old)
        );
        assert_eq!(restored.collision.geometry.get(new), original.collision.geometry.get(old));

        let expected_node = original.transform.scene_graph.get(old).map(|node| SceneGraphComponent {
            parent: remap(node.parent),
            children: node.children.iter().copied().map(remap).collect(),
            ..node.clone()
        });
        assert_eq!(restored.transform.scene_graph.get(new), expected_node.as_ref());
        assert_eq!(
            restored.transform.world_transform(new),
            original.transform.world_transform(old),
            "world transforms are recomputed after import"
        );
    }

    // Re-exporting the import reproduces the document up to renumbering.
    let reexported = export_scene(&restored)?;
    assert_eq!(
        reexported.as_object().unwrap().len(),
        document.as_object().unwrap().len()
    );
    Ok(())
}

#[test]
fn test_parent_references_are_remapped() -> Result<()> {
    // --- 1. ARRANGE ---
    // Document-local ids collide with ids the orchestrator will issue.
    let document = json!({
        "7": {
            "@IdentifierComponent": { "id": "child" },
            "@SceneGraphComponent": {
                "local_pose": {
                    "position": { "x": 1.0, "y": 0.0, "z": 0.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                },
                "local_scale": { "x": 1.0, "y": 1.0, "z": 1.0 },
                "parent": 2,
                "children": []
            }
        },
        "2": {
            "@IdentifierComponent": { "id": "parent" },
            "@SceneGraphComponent": {
                "local_pose": {
                    "position": { "x": 0.0, "y": 5.0, "z": 0.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                },
                "local_scale": { "x": 2.0, "y": 2.0, "z": 2.0 },
                "parent": 0,
                "children": [7]
            }
        }
    });
    let mut env = Environment::new();
    let mut orchestrator = EntityOrchestrator::new();

    // --- 2. ACT ---
    let table = import_scene(&document, &mut env, &mut orchestrator)?;

    // --- 3. ASSERT ---
    let child = env.identifier.find("child").unwrap();
    let parent = env.identifier.find("parent").unwrap();
    assert_eq!(table.get(Entity::from_raw(7)), Some(child));
    assert_eq!(table.get(Entity::from_raw(2)), Some(parent));

    let child_node = env.transform.scene_graph.get(child).unwrap();
    assert_eq!(child_node.parent, parent, "parent must point at the remapped entity");
    assert_eq!(env.transform.scene_graph.get(parent).unwrap().children, vec![child]);
    assert_eq!(env.transform.scene_graph.get(parent).unwrap().parent, Entity::INVALID);

    let world = env.transform.world_transform(child).unwrap();
    assert_eq!(world.pose.position, Vec3::new(2.0, 5.0, 0.0));
    assert_eq!(world.scale, Vec3::new(2.0, 2.0, 2.0));
    Ok(())
}

#[test]
fn test_unknown_component_type_leaves_environment_empty() {
    // --- 1. ARRANGE ---
    let mut orchestrator = EntityOrchestrator::new();
    let mut env = build_scene(&mut orchestrator);
    let document = json!({
        "1": { "@IdentifierComponent": { "id": "fine" } },
        "2": { "@NotARealComponent": { "power": 9000 } }
    });

    // --- 2. ACT ---
    let result = import_scene(&document, &mut env, &mut orchestrator);

    // --- 3. ASSERT ---
    match result {
        Err(SceneError::UnknownComponentType { entity, type_name }) => {
            assert_eq!(entity, Entity::from_raw(2));
            assert_eq!(type_name, "NotARealComponent");
        }
        other => panic!("expected UnknownComponentType, got {other:?}"),
    }
    assert!(env.entity_list().is_empty(), "no half-populated environment");
    assert!(env.identifier.identifiers.is_empty());
    assert!(env.transform.scene_graph.is_empty());
    assert!(env.render.meshes.is_empty());
}

#[test]
fn test_malformed_documents_are_rejected() {
    let cases = [
        (json!([1, 2, 3]), "<root>"),
        (json!({ "abc": {} }), "abc"),
        (json!({ "0": {} }), "0"),
        (json!({ "1": { "IdentifierComponent": { "id": "x" } } }), "1/IdentifierComponent"),
        (json!({ "1": { "@IdentifierComponent": {} } }), "1/@IdentifierComponent"),
        (json!({ "1": { "@IdentifierComponent": { "id": 4 } } }), "1/@IdentifierComponent"),
        (
            json!({ "1": { "@SceneGraphComponent": {
                "local_pose": {
                    "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                },
                "local_scale": { "x": 1.0, "y": 1.0, "z": 1.0 },
                "parent": 99,
                "children": []
            } } }),
            "1/@SceneGraphComponent",
        ),
    ];

    for (document, expected_key) in cases {
        let mut env = Environment::new();
        let mut orchestrator = EntityOrchestrator::new();
        match import_scene(&document, &mut env, &mut orchestrator) {
            Err(SceneError::MalformedDocument { key, .. }) => {
                assert_eq!(key, expected_key, "wrong key reported for {document}")
            }
            other => panic!("expected MalformedDocument for {document}, got {other:?}"),
        }
        assert!(env.entity_list().is_empty());
    }
}

#[test]
fn test_ids_spelled_differently_cannot_alias() {
    // --- 1. ARRANGE ---
    // "1" and "01" are distinct keys naming the same document id.
    let mut orchestrator = EntityOrchestrator::new();
    let mut env = build_scene(&mut orchestrator);
    let document = json!({
        "1": { "@IdentifierComponent": { "id": "first" } },
        "01": { "@IdentifierComponent": { "id": "second" } },
        "5": {
            "@IdentifierComponent": { "id": "child" },
            "@SceneGraphComponent": {
                "local_pose": {
                    "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                },
                "local_scale": { "x": 1.0, "y": 1.0, "z": 1.0 },
                "parent": 1,
                "children": []
            }
        }
    });

    // --- 2. ACT ---
    let result = import_scene(&document, &mut env, &mut orchestrator);

    // --- 3. ASSERT ---
    match result {
        Err(SceneError::MalformedDocument { key, .. }) => assert_eq!(key, "01"),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
    assert!(env.entity_list().is_empty());
    assert!(env.identifier.find("child").is_none());
}

#[test]
fn test_extra_fields_are_ignored() -> Result<()> {
    let document = json!({
        "1": { "@IdentifierComponent": { "id": "kept", "legacy_flag": true } }
    });
    let mut env = Environment::new();
    import_scene(&document, &mut env, &mut EntityOrchestrator::new())?;
    assert!(env.identifier.find("kept").is_some());
    Ok(())
}

#[test]
fn test_export_orders_entities_and_components() -> Result<()> {
    let mut orchestrator = EntityOrchestrator::new();
    let env = build_scene(&mut orchestrator);
    let document = export_scene(&env)?;

    let ids: Vec<&String> = document.as_object().unwrap().keys().collect();
    let expected: Vec<String> = env.entity_list().iter().map(Entity::to_string).collect();
    assert_eq!(ids, expected.iter().collect::<Vec<_>>());

    let chassis = env.identifier.find("chassis").unwrap().to_string();
    let tags: Vec<&String> = document[&chassis].as_object().unwrap().keys().collect();
    assert_eq!(
        tags,
        [
            "@IdentifierComponent",
            "@SceneGraphComponent",
            "@MeshComponent",
            "@MaterialComponent",
            "@GeometryComponent"
        ]
    );
    assert_eq!(document[&chassis]["@MeshComponent"]["gpu_mesh_handle"], "car/body");
    assert_eq!(document[&chassis]["@GeometryComponent"]["cpu_mesh_handle"], "car/body");
    Ok(())
}

#[test]
fn test_scene_file_round_trip() -> Result<()> {
    // --- 1. ARRANGE ---
    let dir = tempdir()?;
    let path = dir.path().join("scenes").join("garage.json");
    let mut orchestrator = EntityOrchestrator::new();
    let original = build_scene(&mut orchestrator);

    // --- 2. ACT ---
    save_scene(&path, &original)?;
    let mut restored = Environment::new();
    load_scene(&path, &mut restored, &mut orchestrator)?;

    // --- 3. ASSERT ---
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("{\n    \""), "documents use four-space indentation");
    assert_eq!(restored.entity_list().len(), 5);
    let lamp = restored.identifier.find("lamp").unwrap();
    assert_eq!(restored.render.point_lights.get(lamp).unwrap().radius, 12.5);
    Ok(())
}

#[test]
fn test_scene_file_errors_carry_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"1\": { \"@Bogus\": {} } }").unwrap();

    let mut env = Environment::new();
    let err = load_scene(&path, &mut env, &mut EntityOrchestrator::new()).unwrap_err();
    assert!(matches!(&err, SceneError::File { path: p, .. } if *p == path));
    assert!(matches!(err.root(), SceneError::UnknownComponentType { .. }));

    let missing = load_scene(&dir.path().join("absent.json"), &mut env, &mut EntityOrchestrator::new());
    assert!(matches!(missing, Err(SceneError::Io { .. })));
    assert!(matches!(
        load_scene(std::path::Path::new(""), &mut env, &mut EntityOrchestrator::new()),
        Err(SceneError::EmptyPath)
    ));
}

#[test]
fn test_identifier_component_tag() {
    use strata_data::ecs::Component;
    assert_eq!(IdentifierComponent::TYPE_NAME, "IdentifierComponent");
    assert_eq!(MeshComponent::TYPE_NAME, "MeshComponent");
    assert_eq!(MaterialComponent::TYPE_NAME, "MaterialComponent");
    assert_eq!(GeometryComponent::TYPE_NAME, "GeometryComponent");
}
