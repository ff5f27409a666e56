//! Scripted input for the headless arena

use glam::Vec2;
use quarrel_behavior::{InputState, Key};

/// Fixed input timeline, one [`InputState`] per tick
#[derive(Debug, Default)]
pub struct InputScript {
    tick: u64,
}

impl InputScript {
    /// Ticks between trigger pulls
    pub const FIRE_EVERY: u64 = 75;
    /// Standing still and shooting down the first lane
    const HOLD_UNTIL: u64 = 240;
    /// Turning towards the second lane
    const TURN_UNTIL: u64 = 330;
    /// Walking into the arena
    const WALK_UNTIL: u64 = 480;

    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next tick
    pub fn next_input(&mut self) -> InputState {
        let tick = self.tick;
        self.tick += 1;

        let mut input = match tick {
            t if t < Self::HOLD_UNTIL => InputState::new(),
            t if t < Self::TURN_UNTIL => InputState::new().with_turn(0.5),
            t if t < Self::WALK_UNTIL => InputState::new().with_move(Vec2::X),
            _ => InputState::new(),
        };

        if tick == Self::HOLD_UNTIL {
            input = input.press(Key::Slot2);
        }
        if tick % Self::FIRE_EVERY == 0 {
            input = input.press(Key::Fire);
        }
        input
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_schedule() {
        let mut script = InputScript::new();
        let fired = (0..200)
            .filter(|_| script.next_input().just_down(Key::Fire))
            .count();
        // Ticks 0, 75 and 150
        assert_eq!(fired, 3);
        assert_eq!(script.ticks(), 200);
    }

    #[test]
    fn test_phases() {
        let mut script = InputScript::new();
        let inputs: Vec<InputState> = (0..500).map(|_| script.next_input()).collect();

        assert_eq!(inputs[10].turn, 0.0);
        assert_eq!(inputs[10].move_dir, Vec2::ZERO);
        assert!(inputs[240].just_down(Key::Slot2));
        assert_eq!(inputs[300].turn, 0.5);
        assert_eq!(inputs[400].move_dir, Vec2::X);
        assert_eq!(inputs[490].move_dir, Vec2::ZERO);
    }
}
