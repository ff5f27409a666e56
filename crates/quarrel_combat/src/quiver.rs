//! Quarrel types, quarrel slots and the player's quiver

use crate::bolt::BoltPayload;
use crate::colour::Colour;
use crate::effect::ActiveEffectType;
use serde::{Deserialize, Serialize};

/// What kind of quarrel a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarrelTypeInfo {
    /// Bolt sprite colour
    pub colour: Colour,
    /// Damage on hit
    pub damage: u32,
    /// Effect the bolt attaches to what it hits
    pub effect: Option<ActiveEffectType>,
}

impl QuarrelTypeInfo {
    /// Plain quarrel
    pub fn plain() -> Self {
        Self {
            colour: Colour::WHITE,
            damage: 10,
            effect: None,
        }
    }

    /// Quarrel that sets its target on fire
    pub fn fire() -> Self {
        Self {
            colour: Colour::ORANGE,
            damage: 10,
            effect: Some(ActiveEffectType::Burning),
        }
    }

    /// Payload carried by a bolt of this type
    pub fn payload(&self) -> BoltPayload {
        BoltPayload {
            damage: self.damage,
            effect: self.effect,
        }
    }
}

impl Default for QuarrelTypeInfo {
    fn default() -> Self {
        Self::plain()
    }
}

/// One slot of the quiver with its own cooldown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarrelSlot {
    pub quarrel: QuarrelTypeInfo,
    /// Seconds before the slot can fire again after a shot
    pub cooldown_time: f32,
    #[serde(default)]
    cooldown: f32,
}

impl QuarrelSlot {
    pub fn new(quarrel: QuarrelTypeInfo, cooldown_time: f32) -> Self {
        Self {
            quarrel,
            cooldown_time: cooldown_time.max(0.0),
            cooldown: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Remaining cooldown as a fraction of the full cooldown
    pub fn cooldown_ratio(&self) -> f32 {
        if self.cooldown_time <= 0.0 {
            return 0.0;
        }
        (self.cooldown / self.cooldown_time).clamp(0.0, 1.0)
    }

    /// Take a quarrel if ready, starting the cooldown
    pub fn take(&mut self) -> Option<QuarrelTypeInfo> {
        if !self.is_ready() {
            return None;
        }
        self.cooldown = self.cooldown_time;
        Some(self.quarrel)
    }

    pub fn on_step(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }
}

const QUIVER_SLOTS: usize = 3;

/// Up to [`PlayerQuiver::MAX_SLOTS`] quarrel slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuiver {
    slots: [Option<QuarrelSlot>; QUIVER_SLOTS],
}

impl PlayerQuiver {
    pub const MAX_SLOTS: usize = QUIVER_SLOTS;

    pub fn new() -> Self {
        Self::default()
    }

    /// Quiver with one plain and one fire slot
    pub fn starter(cooldown_time: f32) -> Self {
        let mut quiver = Self::new();
        quiver.set_slot(0, Some(QuarrelSlot::new(QuarrelTypeInfo::plain(), cooldown_time)));
        quiver.set_slot(1, Some(QuarrelSlot::new(QuarrelTypeInfo::fire(), cooldown_time)));
        quiver
    }

    /// Fill or empty a slot. Out-of-range indices are ignored.
    pub fn set_slot(&mut self, index: usize, slot: Option<QuarrelSlot>) {
        match self.slots.get_mut(index) {
            Some(entry) => *entry = slot,
            None => log::warn!("PlayerQuiver::set_slot: No slot {}", index),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&QuarrelSlot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Take a quarrel from slot `index` if it is filled and ready
    pub fn take_quarrel(&mut self, index: usize) -> Option<QuarrelTypeInfo> {
        self.slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .and_then(QuarrelSlot::take)
    }

    /// Advance every slot's cooldown
    pub fn on_step(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().flatten() {
            slot.on_step(dt);
        }
    }

    pub fn filled_slots(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slot_cooldown() {
        let mut slot = QuarrelSlot::new(QuarrelTypeInfo::plain(), 1.0);
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
        assert_relative_eq!(slot.cooldown_ratio(), 1.0);

        slot.on_step(0.5);
        assert_relative_eq!(slot.cooldown_ratio(), 0.5);
        assert!(slot.take().is_none());

        slot.on_step(0.5);
        assert!(slot.is_ready());
        assert!(slot.take().is_some());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut quiver = PlayerQuiver::starter(1.0);
        assert_eq!(quiver.filled_slots(), 2);

        let plain = quiver.take_quarrel(0).unwrap();
        assert_eq!(plain.effect, None);
        assert!(quiver.take_quarrel(0).is_none());

        let fire = quiver.take_quarrel(1).unwrap();
        assert_eq!(fire.effect, Some(ActiveEffectType::Burning));

        assert!(quiver.take_quarrel(2).is_none());
        assert!(quiver.take_quarrel(7).is_none());
    }

    #[test]
    fn test_payload_from_type() {
        let payload = QuarrelTypeInfo::fire().payload();
        assert_eq!(payload.damage, 10);
        assert_eq!(payload.effect, Some(ActiveEffectType::Burning));
    }

    #[test]
    fn test_quiver_json() {
        let quiver = PlayerQuiver::starter(1.0);
        let json = serde_json::to_string(&quiver).unwrap();
        let back: PlayerQuiver = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slot(1).map(|s| s.quarrel), Some(QuarrelTypeInfo::fire()));
        assert!(back.slot(2).is_none());
    }
}
