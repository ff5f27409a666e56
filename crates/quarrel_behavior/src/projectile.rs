//! Projectiles: spawn descriptions and the two projectile behaviors

use crate::behavior::{Behavior, BehaviorCommand, Contact};
use crate::context::BehaviorContext;
use crate::kind::BehaviorKind;
use crate::render::RenderBinding;
use glam::Vec2;
use quarrel_combat::{BoltPayload, Colour};
use quarrel_physics::{BodyState, FixtureCategories, FixtureDesc};
use std::any::Any;
use std::f32::consts::FRAC_PI_2;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Fired by an enemy, hurts the player
    Enemy,
    /// Fired by the player's crossbow
    Bolt(BoltPayload),
}

/// Everything the host needs to create a projectile entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileDesc {
    pub kind: ProjectileKind,
    /// Shooter position
    pub origin: Vec2,
    /// Unit aim direction
    pub aim: Vec2,
    pub speed: f32,
    /// Shooter velocity added to the projectile's own
    pub inherited_velocity: Vec2,
    pub colour: Colour,
    pub radius: f32,
}

impl ProjectileDesc {
    pub const DEFAULT_RADIUS: f32 = 0.1;
    pub const GROUND_OFFSET: f32 = 0.5;

    /// Enemy shot from `origin` along `aim`
    pub fn enemy(origin: Vec2, aim: Vec2, speed: f32, colour: Colour) -> Self {
        Self {
            kind: ProjectileKind::Enemy,
            origin,
            aim: aim.normalize_or_zero(),
            speed,
            inherited_velocity: Vec2::ZERO,
            colour,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    /// Crossbow bolt from `origin` along `aim`
    pub fn bolt(origin: Vec2, aim: Vec2, speed: f32, payload: BoltPayload, colour: Colour) -> Self {
        Self {
            kind: ProjectileKind::Bolt(payload),
            origin,
            aim: aim.normalize_or_zero(),
            speed,
            inherited_velocity: Vec2::ZERO,
            colour,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn with_inherited_velocity(mut self, velocity: Vec2) -> Self {
        self.inherited_velocity = velocity;
        self
    }

    /// Spawned one unit ahead of the shooter
    pub fn spawn_position(&self) -> Vec2 {
        self.origin + self.aim
    }

    /// Sprites face "up" at angle 0, so rotate a quarter turn back
    pub fn angle(&self) -> f32 {
        self.aim.y.atan2(self.aim.x) - FRAC_PI_2
    }

    pub fn velocity(&self) -> Vec2 {
        self.speed * self.aim + self.inherited_velocity
    }

    /// Fast, continuous-collision body
    pub fn body(&self) -> BodyState {
        let mut body = BodyState::dynamic(self.spawn_position())
            .with_angle(self.angle())
            .with_velocity(self.velocity());
        body.bullet = true;
        body
    }

    pub fn fixture(&self) -> FixtureDesc {
        let categories = match self.kind {
            ProjectileKind::Enemy => FixtureCategories::PROJECTILE,
            ProjectileKind::Bolt(_) => FixtureCategories::PROJECTILE | FixtureCategories::CROSSBOW_BOLT,
        };
        FixtureDesc::circle(self.radius).with_categories(FixtureCategories::DEFAULT | categories)
    }

    pub fn render(&self) -> RenderBinding {
        RenderBinding {
            colour: self.colour,
            height: self.radius * 3.0,
            sprite_radius: self.radius,
            ground_offset: Self::GROUND_OFFSET,
            detached: true,
        }
    }

    /// Behavior for the spawned entity
    pub fn behavior(&self) -> Box<dyn Behavior> {
        match self.kind {
            ProjectileKind::Enemy => Box::new(EnemyProjectile),
            ProjectileKind::Bolt(payload) => Box::new(CrossbowBolt::new(payload)),
        }
    }
}

/// Whether a projectile should be consumed by this contact.
///
/// Sensors only detect, so passing through one never stops a projectile.
fn consumed_by(contact: &Contact) -> bool {
    !contact.other.is_sensor
}

/// Enemy shot; gone on first solid contact
#[derive(Debug, Default)]
pub struct EnemyProjectile;

impl Behavior for EnemyProjectile {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::EnemyProjectile
    }

    fn on_step(&mut self, _ctx: &mut BehaviorContext<'_>, _dt: f32) -> BehaviorCommand {
        BehaviorCommand::Continue
    }

    fn on_begin_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if consumed_by(contact) {
            BehaviorCommand::DestroyEntity
        } else {
            BehaviorCommand::Continue
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Player bolt carrying a payload; gone on first solid contact
#[derive(Debug)]
pub struct CrossbowBolt {
    payload: BoltPayload,
}

impl CrossbowBolt {
    pub fn new(payload: BoltPayload) -> Self {
        Self { payload }
    }
}

impl Behavior for CrossbowBolt {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::CrossbowBolt
    }

    fn on_step(&mut self, _ctx: &mut BehaviorContext<'_>, _dt: f32) -> BehaviorCommand {
        BehaviorCommand::Continue
    }

    fn on_begin_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if consumed_by(contact) {
            BehaviorCommand::DestroyEntity
        } else {
            BehaviorCommand::Continue
        }
    }

    fn bolt_payload(&self) -> Option<BoltPayload> {
        Some(self.payload)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
