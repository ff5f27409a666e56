//! Vertical motion above the ground plane
//!
//! Bodies live on a 2D plane; jumping is faked by a ground offset the
//! renderer draws sprites at. Velocity integrates gravity, offset integrates
//! velocity, and the offset never goes below the ground.

/// Vertical velocity and ground offset of one entity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundMotion {
    /// Upward velocity
    pub up_velocity: f32,
}

impl GroundMotion {
    /// At rest
    pub const fn new() -> Self {
        Self { up_velocity: 0.0 }
    }

    /// Whether `ground_offset` counts as standing on the ground
    pub fn is_grounded(ground_offset: f32) -> bool {
        ground_offset <= 0.0
    }

    /// Start a jump
    pub fn jump(&mut self, velocity: f32) {
        self.up_velocity = velocity;
    }

    /// Integrate one step and return the new ground offset
    pub fn step(&mut self, ground_offset: f32, gravity: f32, dt: f32) -> f32 {
        self.up_velocity = apply_gravity(self.up_velocity, gravity, dt);
        let offset = ground_offset + position_delta(self.up_velocity, dt);
        if offset <= 0.0 {
            self.up_velocity = self.up_velocity.max(0.0);
            0.0
        } else {
            offset
        }
    }
}

/// Velocity after `dt` seconds of gravity
#[inline]
pub fn apply_gravity(up_velocity: f32, gravity: f32, dt: f32) -> f32 {
    up_velocity - gravity * dt
}

/// Distance travelled in `dt` at `up_velocity`
#[inline]
pub fn position_delta(up_velocity: f32, dt: f32) -> f32 {
    up_velocity * dt
}
