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
use std::{fs, path::Path, sync::Arc};
use strata_core::asset::{AssetError, AssetHandle};
use strata_data::{
    assets::{
        AssetTable, BlinnPhongMaterial, Geometry, Material, MaterialKind, MaterialLibrary, Mesh,
        PbrStandardMaterial, Texture,
    },
    ecs::{EntityOrchestrator, Environment},
};
use strata_io::{
    scene::save_scene, DuplicatePolicy, ResolveError, Resolver, ResolverConfig, SceneContext,
};
use tempfile::{tempdir, TempDir};

const ROBOT_OBJ: &str = "\
o arm
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o leg
v 0 0 1
v 1 0 1
v 0 1 1
f 5 6 7
";

fn write_png(path: &Path, size: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbaImage::from_pixel(size, size, image::Rgba([200, 80, 40, 255]))
        .save(path)
        .unwrap();
}

/// An asset root holding a brick texture and a two-part robot model.
fn asset_root() -> TempDir {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("textures").join("brick.png"), 4);
    fs::create_dir_all(dir.path().join("models")).unwrap();
    fs::write(dir.path().join("models").join("robot.obj"), ROBOT_OBJ).unwrap();
    dir
}

/// Two materials sharing the `brick` texture; the second also wants a normal
/// map that exists nowhere.
fn brick_library() -> MaterialLibrary {
    let mut library = MaterialLibrary::new();
    library.create_material(
        "brick-wall",
        MaterialKind::PbrStandard(PbrStandardMaterial {
            albedo: AssetHandle::new("brick"),
            ..Default::default()
        }),
    );
    library.create_material(
        "brick-floor",
        MaterialKind::BlinnPhong(BlinnPhongMaterial {
            diffuse: AssetHandle::new("brick"),
            normal: AssetHandle::new("missing_texture"),
            ..Default::default()
        }),
    );
    library
}

fn robot_scene(orchestrator: &mut EntityOrchestrator) -> Environment {
    let mut env = Environment::new();
    let robot = env.spawn(orchestrator);
    env.identifier.create(robot, "robot");
    env.render.create_mesh(robot, "robot/arm");
    env.render.create_material(robot, "brick-wall");
    env.collision.create(robot, "robot/arm");
    env
}

#[test]
fn test_shared_texture_resolves_once_for_every_material() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = asset_root();
    let library = brick_library();
    let env = Environment::new();
    let mut table = AssetTable::new();
    let resolver = Resolver::new(ResolverConfig::with_root(root.path()));

    // --- 2. ACT ---
    let report = resolver.resolve(&env, &library, &mut table)?;

    // --- 3. ASSERT ---
    let handles: Vec<AssetHandle<Texture>> = ["brick-wall", "brick-floor"]
        .iter()
        .map(|name| {
            let material = library.get(name).unwrap();
            let slot = material.texture_slots()[0];
            slot.handle.clone()
        })
        .collect();
    let wall = table.dereference(&handles[0])?;
    let floor = table.dereference(&handles[1])?;
    assert!(Arc::ptr_eq(wall, floor), "both materials must observe one resource");
    assert_eq!((wall.width, wall.height), (4, 4));
    assert_eq!(
        report.resolved.iter().filter(|r| r.key == "brick").count(),
        1,
        "the texture is loaded once"
    );
    Ok(())
}

#[test]
fn test_model_file_resolves_every_sub_mesh() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = asset_root();
    let mut orchestrator = EntityOrchestrator::new();
    let env = robot_scene(&mut orchestrator);
    let mut table = AssetTable::new();
    let resolver = Resolver::new(ResolverConfig::with_root(root.path()));

    // --- 2. ACT ---
    let report = resolver.resolve(&env, &MaterialLibrary::new(), &mut table)?;

    // --- 3. ASSERT ---
    let robot = env.identifier.find("robot").unwrap();
    let mesh = table.dereference(&env.render.meshes.get(robot).unwrap().mesh)?;
    let geometry = table.dereference(&env.collision.geometry.get(robot).unwrap().geometry)?;
    assert_eq!(mesh.indices.len(), 6);
    assert_eq!(geometry.triangle_count(), 2);
    assert_eq!(geometry.normals.len(), 4, "missing normals are computed");

    // The leg was never requested but came with the same file.
    assert!(table.store::<Mesh>().get("robot/leg").is_some());
    assert!(table.store::<Geometry>().get("robot/leg").is_some());
    assert!(report.was_resolved("mesh", "robot/leg"));
    assert!(report.was_resolved("geometry", "robot/arm"));
    Ok(())
}

#[test]
fn test_missing_texture_is_tolerated() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = asset_root();
    let library = brick_library();
    let mut table = AssetTable::new();
    let resolver = Resolver::new(ResolverConfig::with_root(root.path()));

    // --- 2. ACT ---
    let report = resolver.resolve(&Environment::new(), &library, &mut table)?;

    // --- 3. ASSERT ---
    let missing = AssetHandle::<Texture>::new("missing_texture");
    assert!(!table.is_resolved(&missing));
    assert!(report.is_unresolved("texture", "missing_texture"));
    assert!(!report.is_complete());
    assert_eq!(
        table.dereference(&missing).unwrap_err(),
        AssetError::Unresolved {
            kind: "texture",
            key: "missing_texture".to_owned()
        }
    );
    Ok(())
}

#[test]
fn test_duplicate_candidates_follow_the_policy() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = tempdir()?;
    write_png(&root.path().join("b").join("brick.png"), 2);
    write_png(&root.path().join("a").join("Brick.PNG"), 1);
    let library = brick_library();

    // --- 2. ACT & ASSERT: the first candidate in walk order wins ---
    let mut table = AssetTable::new();
    let report = Resolver::new(ResolverConfig::with_root(root.path()))
        .resolve(&Environment::new(), &library, &mut table)?;
    assert_eq!(report.ambiguous, ["brick"]);
    let brick = table.store::<Texture>().get("brick").unwrap();
    assert_eq!(brick.width, 1, "a/Brick.PNG sorts before b/brick.png");

    // --- 3. ACT & ASSERT: the strict policy binds nothing ---
    let mut table = AssetTable::new();
    let strict = Resolver::new(ResolverConfig {
        on_duplicate: DuplicatePolicy::Error,
        ..ResolverConfig::with_root(root.path())
    });
    match strict.resolve(&Environment::new(), &library, &mut table) {
        Err(ResolveError::Ambiguous { key, candidates }) => {
            assert_eq!(key, "brick");
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("expected Ambiguous, got {other:?}"),
    }
    assert!(table.store::<Texture>().get("brick").is_none());
    Ok(())
}

#[test]
fn test_model_scale_normalizes_largest_extent() -> Result<()> {
    let root = asset_root();
    let mut orchestrator = EntityOrchestrator::new();
    let env = robot_scene(&mut orchestrator);
    let mut table = AssetTable::new();
    let resolver = Resolver::new(ResolverConfig {
        model_scale: Some(10.0),
        ..ResolverConfig::with_root(root.path())
    });

    resolver.resolve(&env, &MaterialLibrary::new(), &mut table)?;

    let arm = table.store::<Geometry>().get("robot/arm").unwrap();
    let size = arm.bounds().unwrap().size();
    approx::assert_relative_eq!(size.x, 10.0);
    approx::assert_relative_eq!(size.y, 10.0);
    Ok(())
}

#[test]
fn test_undecodable_file_is_reported_not_raised() -> Result<()> {
    let root = tempdir()?;
    fs::write(root.path().join("brick.png"), b"definitely not a png")?;
    let mut table = AssetTable::new();

    let report = Resolver::new(ResolverConfig::with_root(root.path())).resolve(
        &Environment::new(),
        &brick_library(),
        &mut table,
    )?;

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, "brick.png");
    assert!(report.is_unresolved("texture", "brick"));
    Ok(())
}

#[test]
fn test_missing_root_aborts_the_pass() {
    let root = tempdir().unwrap();
    let resolver = Resolver::new(ResolverConfig::with_root(root.path().join("nope")));
    let result = resolver.resolve(&Environment::new(), &MaterialLibrary::new(), &mut AssetTable::new());
    assert!(matches!(result, Err(ResolveError::MissingRoot(_))));

    let empty = Resolver::new(ResolverConfig::with_root(""));
    let result = empty.resolve(&Environment::new(), &MaterialLibrary::new(), &mut AssetTable::new());
    assert!(matches!(result, Err(ResolveError::EmptyPath)));
}

#[test]
fn test_context_opens_and_resolves_a_scene() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = asset_root();
    let scene_path = root.path().join("scenes").join("lab.json");
    save_scene(&scene_path, &robot_scene(&mut EntityOrchestrator::new()))?;
    let mut context = SceneContext::new(
        Resolver::new(ResolverConfig::with_root(root.path())),
        brick_library(),
    );

    // --- 2. ACT ---
    let report = context.open_scene(&scene_path)?;

    // --- 3. ASSERT ---
    assert_eq!(context.scene_path(), Some(scene_path.as_path()));
    let robot = context.environment.identifier.find("robot").unwrap();
    let material = &context.environment.render.materials.get(robot).unwrap().material;
    let material = context.assets.dereference(material)?;
    let albedo = context.assets.dereference(material.texture_slots()[0].handle)?;
    assert_eq!(albedo.width, 4);
    assert!(report.was_resolved("mesh", "robot/arm"));
    assert!(report.is_unresolved("texture", "missing_texture"));

    // Reopening replaces the scene instead of merging into it.
    context.open_scene(&scene_path)?;
    assert_eq!(context.environment.entity_list().len(), 1);
    Ok(())
}

#[test]
fn test_material_edits_after_resolve_reach_the_table() -> Result<()> {
    // --- 1. ARRANGE ---
    let root = asset_root();
    let mut library = MaterialLibrary::new();
    library.create_material(
        "wall",
        MaterialKind::PbrStandard(PbrStandardMaterial::default()),
    );
    let mut context = SceneContext::new(
        Resolver::new(ResolverConfig::with_root(root.path())),
        library,
    );
    context.resolve()?;

    // --- 2. ACT ---
    if let Some(material) = context.materials.get_mut("wall") {
        if let MaterialKind::PbrStandard(pbr) = &mut material.kind {
            pbr.albedo = AssetHandle::new("brick");
        }
    }
    let report = context.resolve()?;

    // --- 3. ASSERT ---
    let in_library = context.materials.get("wall").unwrap();
    let in_table = context.assets.dereference(&AssetHandle::<Material>::new("wall"))?;
    assert!(Arc::ptr_eq(in_library, in_table));
    let albedo = in_table.texture_slots()[0].handle.clone();
    assert_eq!(albedo.key(), "brick");
    assert_eq!(context.assets.dereference(&albedo)?.width, 4);
    assert!(report.was_resolved("texture", "brick"));
    Ok(())
}
