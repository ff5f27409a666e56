//! The physics collaborator interface

use crate::body::BodyState;
use crate::error::{PhysicsError, Result};
use crate::fixture::{FixtureDesc, FixtureHandle, FixtureInfo};
use crate::layers::FixtureCategories;
use crate::query::{RayCastOptions, RaycastHit};
use glam::Vec2;
use quarrel_core::Entity;

/// What behaviors may ask of the host physics world.
///
/// Implemented by the host. Every call is synchronous and happens on the
/// simulation thread.
pub trait PhysicsBackend {
    /// Current state of an entity's body
    fn body(&self, entity: Entity) -> Option<BodyState>;

    /// Override an entity's linear velocity
    fn set_linear_velocity(&mut self, entity: Entity, velocity: Vec2) -> Result<()>;

    /// Teleport and rotate an entity's body
    fn set_transform(&mut self, entity: Entity, position: Vec2, angle: f32) -> Result<()>;

    /// Attach a new fixture to an entity's body
    fn create_fixture(&mut self, entity: Entity, desc: FixtureDesc) -> Result<FixtureHandle>;

    /// Remove a fixture
    fn destroy_fixture(&mut self, fixture: FixtureHandle) -> Result<()>;

    /// Look up a live fixture
    fn fixture(&self, fixture: FixtureHandle) -> Option<FixtureInfo>;

    /// The first fixture created for an entity's body
    fn primary_fixture(&self, entity: Entity) -> Option<FixtureHandle>;

    /// OR categories into a fixture's filter
    fn add_fixture_categories(
        &mut self,
        fixture: FixtureHandle,
        categories: FixtureCategories,
    ) -> Result<()>;

    /// Closest fixture hit by the segment `start..end` that `options` accepts
    fn ray_cast(&self, start: Vec2, end: Vec2, options: &RayCastOptions) -> Option<RaycastHit>;

    /// Fixtures overlapping the circle at `center` that `options` accepts,
    /// nearest first
    fn query_circle(&self, center: Vec2, radius: f32, options: &RayCastOptions) -> Vec<FixtureInfo>;
}

/// Position of an entity's body
pub fn position(physics: &dyn PhysicsBackend, entity: Entity) -> Result<Vec2> {
    physics
        .body(entity)
        .map(|body| body.position)
        .ok_or(PhysicsError::BodyNotFound(entity))
}

/// Tag an entity's primary fixture with extra categories
pub fn tag_primary_fixture(
    physics: &mut dyn PhysicsBackend,
    entity: Entity,
    categories: FixtureCategories,
) -> Result<FixtureHandle> {
    let fixture = physics
        .primary_fixture(entity)
        .ok_or(PhysicsError::BodyNotFound(entity))?;
    physics.add_fixture_categories(fixture, categories)?;
    Ok(fixture)
}
