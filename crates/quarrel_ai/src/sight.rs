//! Ray casts: can an enemy see the player, is the player aiming at an enemy

use quarrel_core::Entity;
use quarrel_physics::{FixtureCategories, PhysicsBackend, RayCastOptions, Vec2};

/// Fixtures that never block line of sight
pub const SIGHT_IGNORE: FixtureCategories = FixtureCategories(
    FixtureCategories::SENSOR.0
        | FixtureCategories::PROJECTILE.0
        | FixtureCategories::CROSSBOW_BOLT.0
        | FixtureCategories::FIRE.0
        | FixtureCategories::RENDER_ONLY.0,
);

/// Fixtures the "enemy ahead" ray passes through
pub const AHEAD_IGNORE: FixtureCategories = FixtureCategories(
    FixtureCategories::RENDER_ONLY.0
        | FixtureCategories::PROJECTILE.0
        | FixtureCategories::FIRE.0
        | FixtureCategories::SENSOR.0,
);

/// Cast from `from` toward `to` and report where the player is, if the
/// first solid thing hit is the player.
///
/// Fixtures owned by `looker` are skipped.
pub fn find_player(
    physics: &dyn PhysicsBackend,
    from: Vec2,
    to: Vec2,
    looker: Entity,
) -> Option<Vec2> {
    let options = RayCastOptions::ignoring(SIGHT_IGNORE).excluding(looker);
    let hit = physics.ray_cast(from, to, &options)?;

    if !hit.categories().intersects(FixtureCategories::PLAYER) {
        log::trace!("find_player: Blocked by {:?}", hit.entity());
        return None;
    }

    Some(
        physics
            .body(hit.entity())
            .map(|body| body.position)
            .unwrap_or(hit.point),
    )
}

/// Whether the closest solid fixture within `range` along `direction` is an
/// enemy
pub fn enemy_ahead(
    physics: &dyn PhysicsBackend,
    from: Vec2,
    direction: Vec2,
    range: f32,
    looker: Entity,
) -> bool {
    let direction = direction.normalize_or_zero();
    if direction == Vec2::ZERO {
        return false;
    }
    let options = RayCastOptions::ignoring(AHEAD_IGNORE).excluding(looker);
    physics
        .ray_cast(from, from + direction * range, &options)
        .map(|hit| hit.categories().intersects(FixtureCategories::ENEMY))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarrel_physics::query::{closest_hit, segment_enters_circle};
    use quarrel_physics::{
        BodyState, FixtureDesc, FixtureFilter, FixtureHandle, FixtureInfo, PhysicsError,
        RaycastHit, Result,
    };

    /// Static circles, enough to answer ray casts
    #[derive(Default)]
    struct Circles {
        circles: Vec<(FixtureInfo, Vec2)>,
    }

    impl Circles {
        fn add(&mut self, entity: u32, center: Vec2, radius: f32, categories: FixtureCategories) {
            let info = FixtureInfo {
                handle: FixtureHandle(self.circles.len() as u32 + 1),
                entity: Entity::new(entity, 0),
                radius,
                is_sensor: categories.contains(FixtureCategories::SENSOR),
                filter: FixtureFilter::new(categories, FixtureCategories::ALL),
            };
            self.circles.push((info, center));
        }
    }

    impl PhysicsBackend for Circles {
        fn body(&self, entity: Entity) -> Option<BodyState> {
            self.circles
                .iter()
                .find(|(info, _)| info.entity == entity)
                .map(|(_, center)| BodyState::fixed(*center))
        }

        fn set_linear_velocity(&mut self, entity: Entity, _velocity: Vec2) -> Result<()> {
            Err(PhysicsError::BodyNotFound(entity))
        }

        fn set_transform(&mut self, entity: Entity, _position: Vec2, _angle: f32) -> Result<()> {
            Err(PhysicsError::BodyNotFound(entity))
        }

        fn create_fixture(&mut self, entity: Entity, _desc: FixtureDesc) -> Result<FixtureHandle> {
            Err(PhysicsError::BodyNotFound(entity))
        }

        fn destroy_fixture(&mut self, fixture: FixtureHandle) -> Result<()> {
            Err(PhysicsError::FixtureNotFound(fixture))
        }

        fn fixture(&self, fixture: FixtureHandle) -> Option<FixtureInfo> {
            self.circles
                .iter()
                .find(|(info, _)| info.handle == fixture)
                .map(|(info, _)| *info)
        }

        fn primary_fixture(&self, _entity: Entity) -> Option<FixtureHandle> {
            None
        }

        fn add_fixture_categories(
            &mut self,
            fixture: FixtureHandle,
            _categories: FixtureCategories,
        ) -> Result<()> {
            Err(PhysicsError::FixtureNotFound(fixture))
        }

        fn ray_cast(&self, start: Vec2, end: Vec2, options: &RayCastOptions) -> Option<RaycastHit> {
            let hits = self.circles.iter().filter_map(|(info, center)| {
                segment_enters_circle(start, end, *center, info.radius).map(|fraction| {
                    RaycastHit {
                        fixture: *info,
                        point: start + (end - start) * fraction,
                        fraction,
                    }
                })
            });
            closest_hit(hits, options)
        }

        fn query_circle(&self, center: Vec2, radius: f32, options: &RayCastOptions) -> Vec<FixtureInfo> {
            self.circles
                .iter()
                .filter(|(info, at)| options.accepts(info) && at.distance(center) < radius + info.radius)
                .map(|(info, _)| *info)
                .collect()
        }
    }

    const ENEMY: u32 = 1;
    const PLAYER: u32 = 2;
    const WALL: u32 = 3;

    fn arena() -> Circles {
        let mut world = Circles::default();
        world.add(ENEMY, Vec2::ZERO, 0.5, FixtureCategories::ENEMY);
        world.add(ENEMY, Vec2::ZERO, 5.0, FixtureCategories::SENSOR);
        world.add(PLAYER, Vec2::new(4.0, 0.0), 0.5, FixtureCategories::PLAYER);
        world
    }

    #[test]
    fn test_clear_line_of_sight() {
        let world = arena();
        let seen = find_player(&world, Vec2::ZERO, Vec2::new(4.0, 0.0), Entity::new(ENEMY, 0));
        assert_eq!(seen, Some(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let mut world = arena();
        world.add(WALL, Vec2::new(2.0, 0.0), 0.5, FixtureCategories::DEFAULT);
        let seen = find_player(&world, Vec2::ZERO, Vec2::new(4.0, 0.0), Entity::new(ENEMY, 0));
        assert_eq!(seen, None);
    }

    #[test]
    fn test_fire_and_projectiles_do_not_block_sight() {
        let mut world = arena();
        world.add(WALL, Vec2::new(1.5, 0.0), 0.3, FixtureCategories::FIRE);
        world.add(WALL + 1, Vec2::new(2.5, 0.0), 0.1, FixtureCategories::PROJECTILE);
        let seen = find_player(&world, Vec2::ZERO, Vec2::new(4.0, 0.0), Entity::new(ENEMY, 0));
        assert!(seen.is_some());
    }

    #[test]
    fn test_enemy_ahead() {
        let world = arena();
        let player = Entity::new(PLAYER, 0);
        let from = Vec2::new(4.0, 0.0);

        assert!(enemy_ahead(&world, from, Vec2::NEG_X, 20.0, player));
        assert!(!enemy_ahead(&world, from, Vec2::X, 20.0, player));
        assert!(!enemy_ahead(&world, from, Vec2::NEG_X, 2.0, player));
        assert!(!enemy_ahead(&world, from, Vec2::ZERO, 20.0, player));
    }

    #[test]
    fn test_wall_in_front_of_enemy_is_not_enemy_ahead() {
        let mut world = arena();
        world.add(WALL, Vec2::new(2.0, 0.0), 0.5, FixtureCategories::DEFAULT);
        let from = Vec2::new(4.0, 0.0);
        assert!(!enemy_ahead(&world, from, Vec2::NEG_X, 20.0, Entity::new(PLAYER, 0)));
    }
}
