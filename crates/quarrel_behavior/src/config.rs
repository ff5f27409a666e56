//! Behavior tunables
//!
//! Every section and field is optional in JSON; anything missing takes the
//! default below and unknown fields are ignored.
//!
//! ```json
//! {
//!     "player": { "move_speed": 2.0 },
//!     "enemy": { "shoot_cooldown": 0.5 },
//!     "effects": { "burning": { "damage": 8 } }
//! }
//! ```

use crate::error::ConfigError;
use quarrel_combat::{Colour, EffectRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Player tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    /// Damage at which the player dies
    pub damage_max: f32,
    /// Damage per enemy projectile hit
    pub enemy_projectile_damage: f32,
    /// Radians per second at full turn input
    pub turn_speed: f32,
    /// Turn input multiplier while an enemy is ahead
    pub sticky_look_factor: f32,
    /// Range of the "enemy ahead" ray cast
    pub enemy_ahead_range: f32,
    /// Damage per second added or removed by the debug keys
    pub debug_damage_rate: f32,
    /// Seconds the dead player's camera takes to reach the ground
    pub death_camera_drop: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            damage_max: 100.0,
            enemy_projectile_damage: 20.0,
            turn_speed: 3.14,
            sticky_look_factor: 0.5,
            enemy_ahead_range: 20.0,
            debug_damage_rate: 20.0,
            death_camera_drop: 0.5,
        }
    }
}

/// Ranged enemy tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub sensor_radius: f32,
    pub damage_limit: u32,
    /// Damage per crossbow bolt hit
    pub bolt_damage: u32,
    /// A shot needs strictly more than this many seconds since the last
    pub shoot_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_colour: Colour,
    pub shoot_clip: String,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            sensor_radius: 5.0,
            damage_limit: 10,
            bolt_damage: 10,
            shoot_cooldown: 1.0,
            projectile_speed: 20.0,
            projectile_colour: Colour::RED,
            shoot_clip: "audio/crossbow_shoot.wav".to_string(),
        }
    }
}

/// Melee enemy tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    pub sensor_radius: f32,
    pub damage_limit: u32,
    pub move_speed: f32,
    pub jump_velocity: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            sensor_radius: 5.0,
            damage_limit: 30,
            move_speed: 1.0,
            jump_velocity: 2.0,
        }
    }
}

/// Player weapon tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossbowConfig {
    pub bolt_speed: f32,
    /// Per-slot cooldown after a shot
    pub slot_cooldown: f32,
}

impl Default for CrossbowConfig {
    fn default() -> Self {
        Self {
            bolt_speed: 30.0,
            slot_cooldown: 1.0,
        }
    }
}

/// All behavior tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub melee: MeleeConfig,
    pub effects: EffectRegistry,
    pub crossbow: CrossbowConfig,
}

impl BehaviorConfig {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        log::info!("Loaded behavior config from {}", path.display());
        Ok(config)
    }
}
