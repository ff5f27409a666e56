//! What the host lends a behavior for the duration of one call

use crate::audio::AudioBackend;
use crate::camera::CameraRegistry;
use crate::projectile::ProjectileDesc;
use crate::render::RenderBinding;
use glam::Vec2;
use quarrel_anim::{AnimationChain, Animator, ChainReport};
use quarrel_core::{Entity, EntityLookup};
use quarrel_physics::{BodyState, PhysicsBackend};

/// Collaborators of one behavior call
pub struct BehaviorContext<'a> {
    /// Entity the behavior is attached to
    pub entity: Entity,
    /// Scene time in seconds
    pub time: f32,
    /// Downward acceleration for ground offsets
    pub gravity: f32,
    pub physics: &'a mut dyn PhysicsBackend,
    pub animator: &'a mut dyn Animator,
    pub render: &'a mut RenderBinding,
    pub audio: &'a mut dyn AudioBackend,
    /// Liveness of every entity, for resolving weak references
    pub entities: &'a dyn EntityLookup,
    pub cameras: &'a CameraRegistry,
    /// Projectiles to create once the call returns
    pub spawns: &'a mut Vec<ProjectileDesc>,
}

impl BehaviorContext<'_> {
    /// Our body, if the entity has one
    pub fn body(&self) -> Option<BodyState> {
        self.physics.body(self.entity)
    }

    pub fn position(&self) -> Option<Vec2> {
        self.body().map(|body| body.position)
    }

    /// Position of another entity's body
    pub fn position_of(&self, entity: Entity) -> Option<Vec2> {
        self.physics.body(entity).map(|body| body.position)
    }

    /// Play an animation chain on our animator
    pub fn play(&mut self, chain: &AnimationChain) -> ChainReport {
        chain.apply(&mut *self.animator)
    }

    /// Request a projectile
    pub fn spawn(&mut self, desc: ProjectileDesc) {
        self.spawns.push(desc);
    }
}
