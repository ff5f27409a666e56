//! Rigid body state as seen by behaviors

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves, infinite mass
    Static,
    /// Fully simulated
    #[default]
    Dynamic,
    /// Moved by velocity only
    Kinematic,
}

/// Snapshot of a body's kinematic state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyState {
    /// Body type
    pub body_type: BodyType,
    /// World position
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    /// Linear velocity
    pub linear_velocity: Vec2,
    /// Continuous collision for fast movers
    pub bullet: bool,
}

impl BodyState {
    /// Dynamic body at `position`
    pub fn dynamic(position: Vec2) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position,
            ..Default::default()
        }
    }

    /// Static body at `position`
    pub fn fixed(position: Vec2) -> Self {
        Self {
            body_type: BodyType::Static,
            position,
            ..Default::default()
        }
    }

    /// Set the angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Set the velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Unit vector the body faces
    pub fn forwards(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Advance position by velocity. Static bodies never move.
    pub fn integrate(&mut self, dt: f32) {
        if self.body_type != BodyType::Static {
            self.position += self.linear_velocity * dt;
        }
    }
}
