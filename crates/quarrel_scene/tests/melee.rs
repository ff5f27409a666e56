//! Melee enemy scenarios: pursuit, hopping and burning

use approx::assert_relative_eq;
use quarrel_behavior::{EnemyMelee, ProjectileDesc};
use quarrel_combat::{ActiveEffectType, BoltPayload, Colour};
use quarrel_physics::PhysicsBackend;
use quarrel_scene::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn run(scene: &mut Scene, ticks: usize) {
    let input = InputState::new();
    for _ in 0..ticks {
        scene.tick(&input, DT);
    }
}

fn scene_with_melee_limit(limit: u32) -> Scene {
    let json = format!(r#"{{ "behavior": {{ "melee": {{ "damage_limit": {} }} }} }}"#, limit);
    Scene::new(SceneConfig::from_json_str(&json).unwrap())
}

#[test]
fn test_pursues_and_hops() {
    let mut scene = Scene::new(SceneConfig::default());
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);
    let player = scene.spawn_player(Vec2::new(3.0, 0.0));

    scene.tick(&InputState::new(), DT);

    let state = scene.behavior_as::<EnemyMelee>(melee).unwrap();
    assert!(state.target().is(player));
    assert!(state.up_velocity() < 2.0);
    assert!(state.up_velocity() > 0.0);

    let body = scene.body(melee).unwrap();
    assert_relative_eq!(body.linear_velocity.x, 1.0);
    assert_relative_eq!(body.linear_velocity.y, 0.0);
    assert!(scene.render(melee).unwrap().ground_offset > 0.0);

    run(&mut scene, 30);
    assert!(scene.body(melee).unwrap().position.x > 0.4);
}

#[test]
fn test_lands_and_jumps_again() {
    let mut scene = Scene::new(SceneConfig::default());
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);
    scene.spawn_player(Vec2::new(4.0, 0.0));

    // A 2 m/s hop under 10 m/s^2 gravity lasts 0.4s
    let mut landed = false;
    for _ in 0..30 {
        scene.tick(&InputState::new(), DT);
        if scene.render(melee).unwrap().ground_offset == 0.0 {
            landed = true;
            break;
        }
    }
    assert!(landed);

    scene.tick(&InputState::new(), DT);
    assert!(scene.render(melee).unwrap().ground_offset > 0.0);
}

#[test]
fn test_first_target_is_kept() {
    let mut scene = Scene::new(SceneConfig::default());
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);
    let first = scene.spawn_player(Vec2::new(3.0, 0.0));
    scene.tick(&InputState::new(), DT);

    let second = scene.spawn_player(Vec2::new(-3.0, 0.0));
    scene.tick(&InputState::new(), DT);
    assert!(scene.behavior_as::<EnemyMelee>(melee).unwrap().target().is(first));

    // Only the tracked target leaving clears it
    scene.physics_mut().set_transform(second, Vec2::new(-50.0, 0.0), 0.0).unwrap();
    scene.tick(&InputState::new(), DT);
    assert!(scene.behavior_as::<EnemyMelee>(melee).unwrap().target().is(first));

    scene.physics_mut().set_transform(first, Vec2::new(50.0, 0.0), 0.0).unwrap();
    scene.tick(&InputState::new(), DT);
    assert!(scene.behavior_as::<EnemyMelee>(melee).unwrap().target().is_empty());
}

#[test]
fn test_burns_to_death_in_fire() {
    let mut scene = Scene::new(SceneConfig::default());
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);
    scene.spawn_fire(Vec2::ZERO, 1.0);

    run(&mut scene, 40);

    let state = scene.behavior_as::<EnemyMelee>(melee).unwrap();
    assert_eq!(state.damage().current(), 5);
    assert!(state.status().effects().contains(ActiveEffectType::Burning));
    assert_eq!(scene.render(melee).unwrap().colour, Colour::ORANGE);

    // Six ticks of five reach the default limit of 30 at three seconds
    run(&mut scene, 160);
    assert_eq!(scene.behavior_kind(melee), None);
    assert_eq!(scene.fixture_count(melee), 1);
}

#[test]
fn test_burning_outlasts_the_fire() {
    let mut scene = scene_with_melee_limit(100);
    let melee = scene.spawn_enemy_melee(Vec2::ZERO);
    let fire = scene.spawn_fire(Vec2::ZERO, 1.0);

    run(&mut scene, 10);
    scene.destroy_entity(fire);
    run(&mut scene, 60);

    let state = scene.behavior_as::<EnemyMelee>(melee).unwrap();
    assert!(state.status().hazards().is_empty());
    assert!(state.status().effects().contains(ActiveEffectType::Burning));

    // Expires three seconds after the last refresh
    run(&mut scene, 150);

    let state = scene.behavior_as::<EnemyMelee>(melee).unwrap();
    assert!(state.status().effects().is_empty());
    assert_eq!(state.damage().current(), 30);
    assert_eq!(scene.render(melee).unwrap().colour, Colour::WHITE);
}

#[test]
fn test_fire_bolt_sets_melee_alight() {
    let mut scene = scene_with_melee_limit(100);
    let melee = scene.spawn_enemy_melee(Vec2::new(5.0, 0.0));

    let payload = BoltPayload::new(10).with_effect(ActiveEffectType::Burning);
    scene.spawn_projectile(ProjectileDesc::bolt(
        Vec2::new(3.0, 0.0),
        Vec2::X,
        30.0,
        payload,
        Colour::ORANGE,
    ));
    scene.tick(&InputState::new(), DT);

    let state = scene.behavior_as::<EnemyMelee>(melee).unwrap();
    assert_eq!(state.damage().current(), 10);
    assert!(state.status().effects().contains(ActiveEffectType::Burning));
    assert!(scene.entities_of(BehaviorKind::CrossbowBolt).is_empty());
}
