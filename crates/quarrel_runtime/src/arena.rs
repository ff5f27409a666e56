//! A small fixed arena to run headless

use glam::Vec2;
use quarrel_behavior::{BehaviorKind, Player};
use quarrel_core::Entity;
use quarrel_scene::{Scene, SceneConfig};

/// Snapshot logged while the arena runs
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaReport {
    pub time: f32,
    pub player_alive: bool,
    pub player_damage: Option<f32>,
    pub enemies_left: usize,
    pub projectiles: usize,
}

impl std::fmt::Display for ArenaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let player = match (self.player_alive, self.player_damage) {
            (true, Some(damage)) => format!("player at {:.0} damage", damage),
            _ => "player down".to_string(),
        };
        write!(
            f,
            "t={:.2}s {}, {} enemies left, {} projectiles in flight",
            self.time, player, self.enemies_left, self.projectiles
        )
    }
}

/// Scene plus the handles the runtime cares about
pub struct Arena {
    scene: Scene,
    player: Entity,
}

impl Arena {
    /// Player in the middle, a ranged enemy straight ahead, another
    /// behind a pillar, a melee enemy off to the side and a fire pit
    pub fn build(config: SceneConfig) -> Self {
        let mut scene = Scene::new(config);

        let player = scene.spawn_player(Vec2::ZERO);
        scene.spawn_enemy(Vec2::new(6.0, 0.0));
        scene.spawn_enemy(Vec2::new(0.0, 8.0));
        scene.spawn_wall(Vec2::new(0.0, 4.0), 1.0);
        scene.spawn_enemy_melee(Vec2::new(-4.0, -3.0));
        scene.spawn_fire(Vec2::new(-2.0, -1.5), 0.75);

        log::info!("Arena::build: {} entities", scene.entity_count());
        Self { scene, player }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn report(&self) -> ArenaReport {
        let enemies_left = [BehaviorKind::Enemy, BehaviorKind::EnemyMelee]
            .into_iter()
            .map(|kind| self.scene.entities_of(kind).len())
            .sum();
        let projectiles = [BehaviorKind::EnemyProjectile, BehaviorKind::CrossbowBolt]
            .into_iter()
            .map(|kind| self.scene.entities_of(kind).len())
            .sum();

        let player = self.scene.behavior_as::<Player>(self.player);
        ArenaReport {
            time: self.scene.time(),
            player_alive: player.is_some(),
            player_damage: player.map(Player::damage),
            enemies_left,
            projectiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarrel_scene::InputState;

    #[test]
    fn test_build_counts_enemies() {
        let arena = Arena::build(SceneConfig::default());
        let report = arena.report();
        assert_eq!(report.enemies_left, 3);
        assert_eq!(report.projectiles, 0);
        assert_eq!(report.player_damage, Some(0.0));
    }

    #[test]
    fn test_report_after_ticks() {
        let mut arena = Arena::build(SceneConfig::default());
        for _ in 0..30 {
            arena.scene_mut().tick(&InputState::new(), 1.0 / 60.0);
        }
        let report = arena.report();
        assert!(report.time > 0.4);
        assert!(report.player_alive);
        assert!(report.to_string().contains("3 enemies left"));
    }
}
