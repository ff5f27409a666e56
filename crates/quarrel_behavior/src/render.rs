//! Per-entity render state behaviors may touch

use quarrel_combat::{ActiveEffect, Colour, EffectVisual};
use serde::{Deserialize, Serialize};

/// Sprite parameters of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderBinding {
    pub colour: Colour,
    /// Height of the sprite above its ground offset
    pub height: f32,
    pub sprite_radius: f32,
    /// Distance above the ground plane; jumping raises it
    pub ground_offset: f32,
    /// Drawn independently of the body's rotation
    pub detached: bool,
}

impl Default for RenderBinding {
    fn default() -> Self {
        Self {
            colour: Colour::WHITE,
            height: 1.0,
            sprite_radius: 0.5,
            ground_offset: 0.0,
            detached: false,
        }
    }
}

impl EffectVisual for RenderBinding {
    fn show_effect(&mut self, effect: &ActiveEffect) {
        self.colour = effect.spec().tint;
    }

    fn clear_effects(&mut self) {
        self.colour = Colour::default();
    }
}
