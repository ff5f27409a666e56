//! Scene configuration

use quarrel_behavior::{BehaviorConfig, ConfigError};
use quarrel_physics::PhysicsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One animation the scene registers at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationAsset {
    pub name: String,
    pub file: String,
    /// Seconds per loop
    pub duration: f32,
}

impl AnimationAsset {
    pub fn new(name: &str, file: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
            duration,
        }
    }
}

/// Sprite animations bound to every spawned enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySprites {
    pub run: AnimationAsset,
    pub shoot: AnimationAsset,
    pub stand: AnimationAsset,
    pub die: AnimationAsset,
    pub awake: AnimationAsset,
}

impl Default for EnemySprites {
    fn default() -> Self {
        const FILE: &str = "sprites/enemy.json";
        Self {
            run: AnimationAsset::new("run", FILE, 0.8),
            shoot: AnimationAsset::new("shoot", FILE, 0.4),
            stand: AnimationAsset::new("stand", FILE, 1.0),
            die: AnimationAsset::new("die", FILE, 0.6),
            awake: AnimationAsset::new("awake", FILE, 0.5),
        }
    }
}

/// Everything a scene needs to start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub physics: PhysicsConfig,
    pub behavior: BehaviorConfig,
    pub enemy_sprites: EnemySprites,
}

impl SceneConfig {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("SceneConfig::load: Loaded {}", path.display());
        Ok(config)
    }
}
