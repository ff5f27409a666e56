//! Per-tick input snapshot

use glam::Vec2;
use std::collections::HashSet;

/// Keys behaviors react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Fire the equipped weapon
    Fire,
    /// Select quiver slot 1..=3
    Slot1,
    Slot2,
    Slot3,
    /// Debug: add damage while held
    DamageUp,
    /// Debug: remove damage while held
    DamageDown,
    /// Debug: toggle the "cannot die" override
    ToggleCannotDie,
}

/// Input state for one tick, already mapped from devices
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Movement in the body frame, x forward, y left
    pub move_dir: Vec2,
    /// Turn amount in [-1, 1]; positive turns counter-clockwise
    pub turn: f32,
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move(mut self, dir: Vec2) -> Self {
        self.move_dir = dir;
        self
    }

    pub fn with_turn(mut self, turn: f32) -> Self {
        self.turn = turn;
        self
    }

    /// Key held during this tick
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Key went down this tick (and is held)
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self.held.insert(key);
        self
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn just_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_implies_down() {
        let input = InputState::new().press(Key::Fire).hold(Key::DamageUp);
        assert!(input.just_down(Key::Fire));
        assert!(input.is_down(Key::Fire));
        assert!(input.is_down(Key::DamageUp));
        assert!(!input.just_down(Key::DamageUp));
        assert!(!input.is_down(Key::Slot1));
    }
}
