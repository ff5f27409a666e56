//! Circle-only physics world
//!
//! Bodies move by their velocity and never resolve collisions. Overlapping
//! fixtures whose filters allow contact are "touching"; the world publishes
//! a begin event when a pair starts touching and an end event when it stops
//! or one of the fixtures goes away.

use glam::Vec2;
use quarrel_core::Entity;
use quarrel_physics::query::{closest_hit, segment_enters_circle};
use quarrel_physics::{
    BodyState, ContactEvent, ContactQueue, FixtureCategories, FixtureDesc, FixtureHandle,
    FixtureInfo, PhysicsBackend, PhysicsError, RayCastOptions, RaycastHit, Result,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

type Pair = (FixtureHandle, FixtureHandle);

fn pair(a: FixtureHandle, b: FixtureHandle) -> Pair {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The scene's physics world
#[derive(Debug, Default)]
pub struct SimplePhysics {
    bodies: HashMap<Entity, BodyState>,
    /// Ordered so contact events come out deterministically
    fixtures: BTreeMap<FixtureHandle, FixtureInfo>,
    /// First fixture created per body
    primary: HashMap<Entity, FixtureHandle>,
    touching: BTreeSet<Pair>,
    contacts: ContactQueue,
    next_fixture: u32,
}

impl SimplePhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body with its primary fixture
    pub fn create_body(&mut self, entity: Entity, body: BodyState, primary: FixtureDesc) -> FixtureHandle {
        self.bodies.insert(entity, body);
        let handle = self.insert_fixture(entity, primary);
        self.primary.insert(entity, handle);
        handle
    }

    /// Remove a body and all of its fixtures, ending their contacts
    pub fn remove_body(&mut self, entity: Entity) -> bool {
        if self.bodies.remove(&entity).is_none() {
            return false;
        }
        self.primary.remove(&entity);

        let owned: Vec<FixtureHandle> = self
            .fixtures
            .values()
            .filter(|fixture| fixture.entity == entity)
            .map(|fixture| fixture.handle)
            .collect();
        for handle in owned {
            self.remove_fixture(handle);
        }
        true
    }

    /// Fixtures attached to `entity`
    pub fn fixtures_of(&self, entity: Entity) -> impl Iterator<Item = &FixtureInfo> + '_ {
        self.fixtures.values().filter(move |fixture| fixture.entity == entity)
    }

    /// Whether two fixtures are currently touching
    pub fn is_touching(&self, a: FixtureHandle, b: FixtureHandle) -> bool {
        self.touching.contains(&pair(a, b))
    }

    /// Contact edges published so far
    pub fn contacts(&self) -> &ContactQueue {
        &self.contacts
    }

    /// Integrate bodies and publish contact edges
    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.integrate(dt);
        }

        let now = self.overlapping_pairs();

        for ended in self.touching.difference(&now) {
            if let (Some(a), Some(b)) = (self.fixtures.get(&ended.0), self.fixtures.get(&ended.1)) {
                self.contacts.push(ContactEvent::end(*a, *b));
            }
        }
        for began in now.difference(&self.touching) {
            if let (Some(a), Some(b)) = (self.fixtures.get(&began.0), self.fixtures.get(&began.1)) {
                self.contacts.push(ContactEvent::begin(*a, *b));
            }
        }

        self.touching = now;
    }

    fn insert_fixture(&mut self, entity: Entity, desc: FixtureDesc) -> FixtureHandle {
        self.next_fixture += 1;
        let handle = FixtureHandle(self.next_fixture);
        self.fixtures.insert(
            handle,
            FixtureInfo {
                handle,
                entity,
                radius: desc.radius,
                is_sensor: desc.is_sensor,
                filter: desc.filter,
            },
        );
        handle
    }

    fn remove_fixture(&mut self, handle: FixtureHandle) -> Option<FixtureInfo> {
        let removed = self.fixtures.remove(&handle)?;

        let ended: Vec<Pair> = self
            .touching
            .iter()
            .filter(|(a, b)| *a == handle || *b == handle)
            .copied()
            .collect();
        for edge in ended {
            self.touching.remove(&edge);
            let other = if edge.0 == handle { edge.1 } else { edge.0 };
            if let Some(other) = self.fixtures.get(&other) {
                self.contacts.push(ContactEvent::end(removed, *other));
            }
        }

        Some(removed)
    }

    fn center(&self, fixture: &FixtureInfo) -> Option<Vec2> {
        self.bodies.get(&fixture.entity).map(|body| body.position)
    }

    fn overlapping_pairs(&self) -> BTreeSet<Pair> {
        let fixtures: Vec<&FixtureInfo> = self.fixtures.values().collect();
        let mut pairs = BTreeSet::new();

        for (i, a) in fixtures.iter().enumerate() {
            for b in &fixtures[i + 1..] {
                if a.entity == b.entity || (a.is_sensor && b.is_sensor) {
                    continue;
                }
                if !a.filter.can_touch(&b.filter) {
                    continue;
                }
                let (Some(pa), Some(pb)) = (self.center(a), self.center(b)) else {
                    continue;
                };
                if pa.distance(pb) < a.radius + b.radius {
                    pairs.insert(pair(a.handle, b.handle));
                }
            }
        }

        pairs
    }
}

impl PhysicsBackend for SimplePhysics {
    fn body(&self, entity: Entity) -> Option<BodyState> {
        self.bodies.get(&entity).copied()
    }

    fn set_linear_velocity(&mut self, entity: Entity, velocity: Vec2) -> Result<()> {
        let body = self
            .bodies
            .get_mut(&entity)
            .ok_or(PhysicsError::BodyNotFound(entity))?;
        body.linear_velocity = velocity;
        Ok(())
    }

    fn set_transform(&mut self, entity: Entity, position: Vec2, angle: f32) -> Result<()> {
        let body = self
            .bodies
            .get_mut(&entity)
            .ok_or(PhysicsError::BodyNotFound(entity))?;
        body.position = position;
        body.angle = angle;
        Ok(())
    }

    fn create_fixture(&mut self, entity: Entity, desc: FixtureDesc) -> Result<FixtureHandle> {
        if !self.bodies.contains_key(&entity) {
            return Err(PhysicsError::BodyNotFound(entity));
        }
        if desc.radius.is_nan() || desc.radius <= 0.0 {
            return Err(PhysicsError::InvalidShape(format!("radius {}", desc.radius)));
        }
        Ok(self.insert_fixture(entity, desc))
    }

    fn destroy_fixture(&mut self, fixture: FixtureHandle) -> Result<()> {
        let removed = self
            .remove_fixture(fixture)
            .ok_or(PhysicsError::FixtureNotFound(fixture))?;
        if self.primary.get(&removed.entity) == Some(&fixture) {
            self.primary.remove(&removed.entity);
        }
        Ok(())
    }

    fn fixture(&self, fixture: FixtureHandle) -> Option<FixtureInfo> {
        self.fixtures.get(&fixture).copied()
    }

    fn primary_fixture(&self, entity: Entity) -> Option<FixtureHandle> {
        self.primary.get(&entity).copied()
    }

    fn add_fixture_categories(&mut self, fixture: FixtureHandle, categories: FixtureCategories) -> Result<()> {
        let info = self
            .fixtures
            .get_mut(&fixture)
            .ok_or(PhysicsError::FixtureNotFound(fixture))?;
        info.filter = info.filter.add_categories(categories);
        Ok(())
    }

    fn ray_cast(&self, start: Vec2, end: Vec2, options: &RayCastOptions) -> Option<RaycastHit> {
        let hits = self.fixtures.values().filter_map(|fixture| {
            let center = self.center(fixture)?;
            let fraction = segment_enters_circle(start, end, center, fixture.radius)?;
            Some(RaycastHit {
                fixture: *fixture,
                point: start + (end - start) * fraction,
                fraction,
            })
        });
        closest_hit(hits, options)
    }

    fn query_circle(&self, center: Vec2, radius: f32, options: &RayCastOptions) -> Vec<FixtureInfo> {
        let mut found: Vec<(f32, FixtureInfo)> = self
            .fixtures
            .values()
            .filter(|fixture| options.accepts(fixture))
            .filter_map(|fixture| {
                let distance = self.center(fixture)?.distance(center);
                (distance < radius + fixture.radius).then_some((distance, *fixture))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found.into_iter().map(|(_, fixture)| fixture).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarrel_physics::{ContactPhase, FixtureFilter};

    fn world_with_two() -> (SimplePhysics, Entity, Entity) {
        let mut world = SimplePhysics::new();
        let a = Entity::new(1, 0);
        let b = Entity::new(2, 0);
        world.create_body(a, BodyState::dynamic(Vec2::ZERO), FixtureDesc::circle(0.5));
        world.create_body(b, BodyState::dynamic(Vec2::new(3.0, 0.0)), FixtureDesc::circle(0.5));
        (world, a, b)
    }

    #[test]
    fn test_begin_then_end() {
        let (mut world, a, _) = world_with_two();
        world.step(0.1);
        assert!(world.contacts().is_empty());

        world.set_transform(a, Vec2::new(2.5, 0.0), 0.0).unwrap();
        world.step(0.1);
        let events = world.contacts().drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::Begin);

        // Still overlapping: no new edge
        world.step(0.1);
        assert!(world.contacts().is_empty());

        world.set_transform(a, Vec2::ZERO, 0.0).unwrap();
        world.step(0.1);
        let events = world.contacts().drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::End);
    }

    #[test]
    fn test_filter_blocks_contact() {
        let (mut world, a, b) = world_with_two();
        world
            .create_fixture(
                a,
                FixtureDesc::sensor(5.0)
                    .with_categories(FixtureCategories::SENSOR)
                    .with_mask(FixtureCategories::PLAYER),
            )
            .unwrap();
        world.step(0.1);
        assert!(world.contacts().is_empty());

        let primary = world.primary_fixture(b).unwrap();
        world.add_fixture_categories(primary, FixtureCategories::PLAYER).unwrap();
        world.step(0.1);
        let events = world.contacts().drain();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_begin());
        assert!(events[0].sides().iter().any(|side| side.own.is_sensor));
    }

    #[test]
    fn test_removing_body_ends_contacts() {
        let (mut world, a, b) = world_with_two();
        world.set_transform(a, Vec2::new(2.5, 0.0), 0.0).unwrap();
        world.step(0.1);
        world.contacts().drain();

        assert!(world.remove_body(b));
        let events = world.contacts().drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::End);
        assert_eq!(world.fixtures_of(b).count(), 0);
        assert!(!world.remove_body(b));
    }

    #[test]
    fn test_ray_cast_closest() {
        let (mut world, a, b) = world_with_two();
        let wall = Entity::new(3, 0);
        world.create_body(wall, BodyState::fixed(Vec2::new(1.5, 0.0)), FixtureDesc::circle(0.5));

        let options = RayCastOptions::default().excluding(a);
        let hit = world.ray_cast(Vec2::ZERO, Vec2::new(3.0, 0.0), &options).unwrap();
        assert_eq!(hit.entity(), wall);

        let primary = world.primary_fixture(wall).unwrap();
        world.add_fixture_categories(primary, FixtureCategories::RENDER_ONLY).unwrap();
        let options = RayCastOptions::ignoring(FixtureCategories::RENDER_ONLY).excluding(a);
        let hit = world.ray_cast(Vec2::ZERO, Vec2::new(3.0, 0.0), &options).unwrap();
        assert_eq!(hit.entity(), b);
        assert_eq!(hit.fixture.filter, FixtureFilter::DEFAULT);
    }

    #[test]
    fn test_query_circle_nearest_first() {
        let (mut world, a, b) = world_with_two();
        let far = Entity::new(3, 0);
        world.create_body(far, BodyState::fixed(Vec2::new(0.0, 4.0)), FixtureDesc::circle(0.5));

        let found = world.query_circle(Vec2::new(0.5, 0.0), 4.0, &RayCastOptions::default());
        let entities: Vec<Entity> = found.iter().map(|fixture| fixture.entity).collect();
        assert_eq!(entities, vec![a, b, far]);

        let options = RayCastOptions::default().excluding(a);
        let found = world.query_circle(Vec2::ZERO, 1.0, &options);
        assert!(found.is_empty());
    }
}
