//! Saving and loading behavior documents through a scene

use approx::assert_relative_eq;
use quarrel_behavior::{Enemy, EnemyMelee, PersistError, Player};
use quarrel_scene::prelude::*;
use serde_json::json;

#[test]
fn test_enemy_document_names_animations() {
    let mut scene = Scene::new(SceneConfig::default());
    let enemy = scene.spawn_enemy(Vec2::ZERO);

    let doc = scene.save_behavior(enemy).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["kind"], "Enemy");
    assert_eq!(doc["data"]["IdleAnim"]["name"], "stand");
    assert_eq!(doc["data"]["AwakeAnim"]["file"], "sprites/enemy.json");
}

#[test]
fn test_enemy_round_trip_rebinds_animations() {
    let mut scene = Scene::new(SceneConfig::default());
    let source = scene.spawn_enemy(Vec2::ZERO);
    let target = scene.spawn_enemy(Vec2::new(10.0, 0.0));

    let mut doc = scene.save_behavior(source).unwrap();
    doc["data"]["IdleAnim"] = doc["data"]["RunAnim"].clone();
    scene.load_behavior(target, &doc).unwrap();

    let run = scene.enemy_animations().run;
    let animations = *scene.behavior_as::<Enemy>(target).unwrap().animations();
    assert_eq!(animations.stand, run);
    assert_eq!(animations.die, scene.enemy_animations().die);
}

#[test]
fn test_unknown_animation_unbinds() {
    let mut scene = Scene::new(SceneConfig::default());
    let enemy = scene.spawn_enemy(Vec2::ZERO);

    let doc = json!({
        "version": 1,
        "kind": "Enemy",
        "data": { "IdleAnim": { "name": "missing", "file": "sprites/enemy.json" } }
    });
    scene.load_behavior(enemy, &doc).unwrap();

    let animations = *scene.behavior_as::<Enemy>(enemy).unwrap().animations();
    assert!(!animations.stand.is_valid());
    assert!(!animations.run.is_valid());
}

#[test]
fn test_player_fields_load() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let doc = json!({
        "version": 1,
        "kind": "Player",
        "data": { "MoveSpeed": 2.5, "Camera": { "height": 0.8 } }
    });
    scene.load_behavior(player, &doc).unwrap();

    let state = scene.behavior_as::<Player>(player).unwrap();
    assert_relative_eq!(state.move_speed(), 2.5);
    assert_relative_eq!(scene.cameras().main_view().unwrap().height, 0.8);

    let saved = scene.save_behavior(player).unwrap();
    assert_eq!(saved["data"]["MoveSpeed"], 2.5);
    assert!(saved["data"]["Quiver"].is_object());
}

#[test]
fn test_unversioned_flat_document() {
    let mut scene = Scene::new(SceneConfig::default());
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);

    scene
        .load_behavior(melee, &json!({ "MoveSpeed": 3.0, "JumpVelocity": 4.0 }))
        .unwrap();

    let saved = scene.save_behavior(melee).unwrap();
    assert_eq!(saved["kind"], "EnemyMelee");
    assert_eq!(saved["data"]["MoveSpeed"], 3.0);
    assert_eq!(saved["data"]["JumpVelocity"], 4.0);
    assert!(scene.behavior_as::<EnemyMelee>(melee).is_some());
}

#[test]
fn test_malformed_field_keeps_default() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let doc = json!({ "version": 1, "kind": "Player", "data": { "MoveSpeed": "fast" } });
    scene.load_behavior(player, &doc).unwrap();
    assert_relative_eq!(scene.behavior_as::<Player>(player).unwrap().move_speed(), 1.0);
}

#[test]
fn test_newer_version_is_rejected() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let doc = json!({ "version": 2, "kind": "Player", "data": { "MoveSpeed": 9.0 } });
    let err = scene.load_behavior(player, &doc).unwrap_err();
    assert!(matches!(
        err,
        SceneError::Persist(PersistError::UnsupportedVersion { found: 2, .. })
    ));
    assert_relative_eq!(scene.behavior_as::<Player>(player).unwrap().move_speed(), 1.0);
}

#[test]
fn test_kind_mismatch_is_rejected() {
    let mut scene = Scene::new(SceneConfig::default());
    let enemy = scene.spawn_enemy(Vec2::ZERO);
    let melee = scene.spawn_enemy_melee(Vec2::new(10.0, 0.0));

    let doc = scene.save_behavior(enemy).unwrap();
    let err = scene.load_behavior(melee, &doc).unwrap_err();
    assert!(matches!(err, SceneError::Persist(PersistError::KindMismatch { .. })));
}
