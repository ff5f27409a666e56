//! What a crossbow bolt does to whatever it hits

use crate::effect::ActiveEffectType;
use serde::{Deserialize, Serialize};

/// Damage plus an optional status effect carried by a bolt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoltPayload {
    pub damage: u32,
    pub effect: Option<ActiveEffectType>,
}

impl BoltPayload {
    pub fn new(damage: u32) -> Self {
        Self {
            damage,
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: ActiveEffectType) -> Self {
        self.effect = Some(effect);
        self
    }
}

impl Default for BoltPayload {
    fn default() -> Self {
        Self::new(10)
    }
}
