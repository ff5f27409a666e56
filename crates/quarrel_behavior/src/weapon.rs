//! The player's crossbow

use crate::config::CrossbowConfig;
use crate::context::BehaviorContext;
use crate::input::{InputState, Key};
use crate::projectile::ProjectileDesc;
use glam::Vec2;
use quarrel_combat::PlayerQuiver;

/// Crossbow firing bolts from a quiver of quarrel slots
#[derive(Debug, Clone)]
pub struct Crossbow {
    quiver: PlayerQuiver,
    selected: usize,
    bolt_speed: f32,
}

impl Crossbow {
    pub fn new(config: &CrossbowConfig) -> Self {
        Self {
            quiver: PlayerQuiver::starter(config.slot_cooldown),
            selected: 0,
            bolt_speed: config.bolt_speed,
        }
    }

    pub fn quiver(&self) -> &PlayerQuiver {
        &self.quiver
    }

    pub fn set_quiver(&mut self, quiver: PlayerQuiver) {
        self.quiver = quiver;
    }

    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// Advance cooldowns, switch slots and fire on input.
    ///
    /// `aim` is the direction the player's camera faces.
    pub fn handle_input(&mut self, input: &InputState, ctx: &mut BehaviorContext<'_>, aim: Vec2, dt: f32) {
        self.quiver.on_step(dt);

        for (index, key) in [Key::Slot1, Key::Slot2, Key::Slot3].into_iter().enumerate() {
            if input.just_down(key) {
                self.selected = index;
            }
        }

        if !input.just_down(Key::Fire) {
            return;
        }

        let Some(body) = ctx.body() else {
            log::warn!("Crossbow::handle_input: {} has no body", ctx.entity);
            return;
        };

        let Some(quarrel) = self.quiver.take_quarrel(self.selected) else {
            log::debug!("Crossbow::handle_input: Slot {} not ready", self.selected);
            return;
        };

        log::debug!("Crossbow::handle_input: Firing from slot {}", self.selected);
        ctx.spawn(
            ProjectileDesc::bolt(
                body.position,
                aim,
                self.bolt_speed,
                quarrel.payload(),
                quarrel.colour,
            )
            .with_inherited_velocity(body.linear_velocity),
        );
    }
}
