//! Physics queries (ray casts)

use crate::fixture::FixtureInfo;
use crate::layers::FixtureCategories;
use glam::Vec2;
use quarrel_core::Entity;

/// Result of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The fixture that was hit
    pub fixture: FixtureInfo,
    /// Hit point in world space
    pub point: Vec2,
    /// Fraction along the ray (0 = start, 1 = end)
    pub fraction: f32,
}

impl RaycastHit {
    /// Entity owning the hit fixture
    pub fn entity(&self) -> Entity {
        self.fixture.entity
    }

    /// Categories of the hit fixture
    pub fn categories(&self) -> FixtureCategories {
        self.fixture.categories()
    }
}

/// Options for ray cast queries
#[derive(Debug, Clone, Default)]
pub struct RayCastOptions {
    /// Fixtures carrying any of these categories are passed through
    pub ignore: FixtureCategories,
    /// Fixtures owned by this entity are passed through
    pub exclude: Option<Entity>,
}

impl RayCastOptions {
    /// Pass through fixtures in `categories`
    pub fn ignoring(categories: FixtureCategories) -> Self {
        Self {
            ignore: categories,
            exclude: None,
        }
    }

    /// Also pass through fixtures of `entity`
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }

    /// Whether a fixture should be reported
    pub fn accepts(&self, fixture: &FixtureInfo) -> bool {
        if fixture.categories().intersects(self.ignore) {
            return false;
        }
        self.exclude != Some(fixture.entity)
    }
}

/// Fraction along `start..end` at which the segment enters a circle.
///
/// Rays that start inside the circle never report it.
pub fn segment_enters_circle(start: Vec2, end: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let d = end - start;
    let f = start - center;
    let a = d.dot(d);
    if a <= f32::EPSILON {
        return None;
    }
    let c = f.dot(f) - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Pick the closest accepted hit
pub fn closest_hit<I>(hits: I, options: &RayCastOptions) -> Option<RaycastHit>
where
    I: IntoIterator<Item = RaycastHit>,
{
    hits.into_iter()
        .filter(|hit| options.accepts(&hit.fixture))
        .min_by(|a, b| a.fraction.total_cmp(&b.fraction))
}
