//! Physics configuration

use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed timestep for the simulation
    pub timestep: f32,

    /// Downward acceleration for the ground-offset model (units/s²)
    pub gravity: f32,

    /// Radius of a freshly spawned body's primary fixture
    pub default_body_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            gravity: 10.0,
            default_body_radius: 0.5,
        }
    }
}

impl PhysicsConfig {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }
}
