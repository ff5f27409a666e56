//! Player scenarios: movement, damage, death and the crossbow

use approx::assert_relative_eq;
use quarrel_behavior::{DeadPlayer, Key, Player, ProjectileDesc};
use quarrel_combat::Colour;
use quarrel_physics::PhysicsBackend;
use quarrel_scene::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn run(scene: &mut Scene, ticks: usize) {
    let input = InputState::new();
    for _ in 0..ticks {
        scene.tick(&input, DT);
    }
}

/// Enemy shot that reaches a player standing at the origin on the next step
fn shot_at_origin() -> ProjectileDesc {
    ProjectileDesc::enemy(Vec2::new(2.0, 0.0), Vec2::NEG_X, 30.0, Colour::RED)
}

#[test]
fn test_camera_follows_movement() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let forwards = InputState::new().with_move(Vec2::X);
    for _ in 0..30 {
        scene.tick(&forwards, DT);
    }

    let body = scene.body(player).unwrap();
    assert!(body.position.x > 0.4);
    assert_relative_eq!(body.position.y, 0.0, epsilon = 1e-5);

    let view = scene.cameras().main_view().unwrap();
    assert_relative_eq!(view.position.x, body.position.x, epsilon = 1e-5);
    assert_eq!(scene.audio().listener().map(|(position, _)| position), Some(body.position));
}

#[test]
fn test_turning_rotates_body_and_camera() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let left = InputState::new().with_turn(1.0);
    for _ in 0..10 {
        scene.tick(&left, DT);
    }

    let angle = scene.body(player).unwrap().angle;
    assert_relative_eq!(angle, 10.0 * 3.14 * DT, epsilon = 1e-4);
    assert_relative_eq!(scene.cameras().main_view().unwrap().rotation, angle, epsilon = 1e-5);
}

#[test]
fn test_enemy_projectile_hurts_player() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);
    let projectile = scene.spawn_projectile(shot_at_origin());

    scene.tick(&InputState::new(), DT);

    assert!(!scene.is_alive(projectile));
    let state = scene.behavior_as::<Player>(player).unwrap();
    assert_relative_eq!(state.damage(), 20.0);
    assert_relative_eq!(state.hud().damage_ratio, 0.2);
}

#[test]
fn test_lethal_hit_leaves_dead_player() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);
    scene.behavior_as_mut::<Player>(player).unwrap().set_damage(95.0);
    scene.spawn_projectile(shot_at_origin());

    scene.tick(&InputState::new(), DT);

    assert_eq!(scene.behavior_kind(player), Some(BehaviorKind::DeadPlayer));
    assert_eq!(scene.cameras().len(), 1);
    let dead = scene.behavior_as::<DeadPlayer>(player).unwrap();
    assert!(dead.camera().is_main());
    assert_relative_eq!(scene.cameras().main_view().unwrap().height, 0.5);

    // Still follows the body while the camera sinks
    scene.physics_mut().set_linear_velocity(player, Vec2::new(0.0, 1.0)).unwrap();
    run(&mut scene, 15);

    let body = scene.body(player).unwrap();
    let view = scene.cameras().main_view().unwrap();
    assert_relative_eq!(view.position.y, body.position.y, epsilon = 1e-5);
    assert_relative_eq!(view.height, 0.25, epsilon = 1e-3);

    run(&mut scene, 30);
    assert_relative_eq!(scene.cameras().main_view().unwrap().height, 0.0);
    assert_eq!(scene.behavior_kind(player), Some(BehaviorKind::DeadPlayer));
}

#[test]
fn test_cannot_die_survives_lethal_damage() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);
    {
        let state = scene.behavior_as_mut::<Player>(player).unwrap();
        state.set_damage(95.0);
        state.set_cannot_die(true);
    }
    scene.spawn_projectile(shot_at_origin());

    run(&mut scene, 3);

    let state = scene.behavior_as::<Player>(player).unwrap();
    assert_relative_eq!(state.damage(), 115.0);
    assert!(state.hud().cannot_die);

    // Turning the override off lets the pending damage kill
    scene.tick(&InputState::new().press(Key::ToggleCannotDie), DT);
    assert_eq!(scene.behavior_kind(player), Some(BehaviorKind::DeadPlayer));
}

#[test]
fn test_debug_damage_keys() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let up = InputState::new().hold(Key::DamageUp);
    for _ in 0..30 {
        scene.tick(&up, DT);
    }
    assert_relative_eq!(scene.behavior_as::<Player>(player).unwrap().damage(), 10.0, epsilon = 1e-3);

    let down = InputState::new().hold(Key::DamageDown);
    for _ in 0..60 {
        scene.tick(&down, DT);
    }
    assert_eq!(scene.behavior_as::<Player>(player).unwrap().damage(), 0.0);
}

#[test]
fn test_player_burns_in_fire() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);
    scene.spawn_fire(Vec2::ZERO, 1.0);

    run(&mut scene, 40);

    let state = scene.behavior_as::<Player>(player).unwrap();
    assert_relative_eq!(state.damage(), 5.0);
    assert!(state.hud().burning);
    assert_eq!(scene.render(player).unwrap().colour, Colour::ORANGE);
}

#[test]
fn test_crossbow_fires_once_per_cooldown() {
    let mut scene = Scene::new(SceneConfig::default());
    let player = scene.spawn_player(Vec2::ZERO);

    let fire = InputState::new().press(Key::Fire);
    scene.tick(&fire, DT);

    let bolts = scene.entities_of(BehaviorKind::CrossbowBolt);
    assert_eq!(bolts.len(), 1);
    let body = scene.body(bolts[0]).unwrap();
    assert_relative_eq!(body.position.x, 1.0);
    assert_relative_eq!(body.linear_velocity.x, 30.0);

    // Slot one is cooling down
    scene.tick(&fire, DT);
    assert_eq!(scene.entities_of(BehaviorKind::CrossbowBolt).len(), 1);
    let hud = scene.behavior_as::<Player>(player).unwrap().hud();
    assert!(hud.slot_cooldowns[0].is_some_and(|ratio| ratio > 0.9));
    assert_eq!(hud.slot_cooldowns[1], Some(0.0));

    // Slot two has its own cooldown
    scene.tick(&InputState::new().press(Key::Slot2).press(Key::Fire), DT);
    assert_eq!(scene.entities_of(BehaviorKind::CrossbowBolt).len(), 2);
    assert_eq!(scene.behavior_as::<Player>(player).unwrap().hud().selected_slot, 1);
}

#[test]
fn test_bolt_kills_enemy_ahead() {
    let mut scene = Scene::new(SceneConfig::default());
    scene.spawn_player(Vec2::ZERO);
    let enemy = scene.spawn_enemy(Vec2::new(4.0, 0.0));

    scene.tick(&InputState::new().press(Key::Fire), DT);
    run(&mut scene, 9);

    assert_eq!(scene.behavior_kind(enemy), None);
    assert!(scene.entities_of(BehaviorKind::CrossbowBolt).is_empty());
    assert!(scene.entities_of(BehaviorKind::EnemyProjectile).is_empty());
}
