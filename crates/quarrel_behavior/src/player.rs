//! The player: movement, damage and death hand-off

use crate::behavior::{Behavior, BehaviorCommand, Contact};
use crate::camera::{Camera3D, CameraLease};
use crate::config::{BehaviorConfig, PlayerConfig};
use crate::context::BehaviorContext;
use crate::dead_player::DeadPlayer;
use crate::input::{InputState, Key};
use crate::kind::BehaviorKind;
use crate::persist::read_field;
use crate::weapon::Crossbow;
use glam::Vec2;
use quarrel_ai::enemy_ahead;
use quarrel_anim::AnimationLibrary;
use quarrel_combat::{ActiveEffectType, CombatStatus, ContactPairs, PlayerQuiver};
use quarrel_physics::{backend, FixtureCategories};
use serde_json::{json, Value};
use std::any::Any;

/// What the HUD overlay shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHud {
    /// Damage as a fraction of the maximum
    pub damage_ratio: f32,
    /// Full-screen burning overlay
    pub burning: bool,
    pub cannot_die: bool,
    /// Cooldown ratio per quiver slot, `None` for empty slots
    pub slot_cooldowns: [Option<f32>; PlayerQuiver::MAX_SLOTS],
    pub selected_slot: usize,
}

pub struct Player {
    camera: CameraLease,
    status: CombatStatus,
    damage: f32,
    hits: ContactPairs,
    cannot_die: bool,
    weapon: Option<Crossbow>,
    config: PlayerConfig,
}

impl Player {
    /// Attach to `ctx.entity`: tag its body as the player and register a
    /// camera at its transform
    pub fn new(ctx: &mut BehaviorContext<'_>, config: &BehaviorConfig) -> Self {
        if let Err(err) = backend::tag_primary_fixture(ctx.physics, ctx.entity, FixtureCategories::PLAYER) {
            log::warn!("Player::new: Couldn't tag {} as player: {}", ctx.entity, err);
        }

        let camera = match ctx.body() {
            Some(body) => Camera3D::at(body.position, body.angle),
            None => Camera3D::default(),
        };

        Self {
            camera: ctx.cameras.register(camera),
            status: CombatStatus::new(config.effects),
            damage: 0.0,
            hits: ContactPairs::new(),
            cannot_die: false,
            weapon: Some(Crossbow::new(&config.crossbow)),
            config: config.player.clone(),
        }
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn set_damage(&mut self, damage: f32) {
        self.damage = damage.max(0.0);
    }

    pub fn move_speed(&self) -> f32 {
        self.config.move_speed
    }

    pub fn cannot_die(&self) -> bool {
        self.cannot_die
    }

    pub fn set_cannot_die(&mut self, cannot_die: bool) {
        self.cannot_die = cannot_die;
    }

    pub fn camera(&self) -> &CameraLease {
        &self.camera
    }

    pub fn status(&self) -> &CombatStatus {
        &self.status
    }

    pub fn weapon(&self) -> Option<&Crossbow> {
        self.weapon.as_ref()
    }

    pub fn hud(&self) -> PlayerHud {
        let mut slot_cooldowns = [None; PlayerQuiver::MAX_SLOTS];
        if let Some(weapon) = &self.weapon {
            for (index, cooldown) in slot_cooldowns.iter_mut().enumerate() {
                *cooldown = weapon.quiver().slot(index).map(|slot| slot.cooldown_ratio());
            }
        }
        PlayerHud {
            damage_ratio: self.damage / self.config.damage_max,
            burning: self.status.effects().contains(ActiveEffectType::Burning),
            cannot_die: self.cannot_die,
            slot_cooldowns,
            selected_slot: self.weapon.as_ref().map(Crossbow::selected_slot).unwrap_or(0),
        }
    }
}

impl Behavior for Player {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Player
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut BehaviorContext<'_>, dt: f32) {
        let Some(body) = ctx.body() else {
            log::warn!("Player::handle_input: {} has no body", ctx.entity);
            return;
        };

        // Leave the velocity alone without input so external pushes persist
        if input.move_dir.length_squared() != 0.0 {
            let velocity = Vec2::from_angle(body.angle).rotate(input.move_dir) * self.config.move_speed;
            if let Err(err) = ctx.physics.set_linear_velocity(ctx.entity, velocity) {
                log::warn!("Player::handle_input: {}", err);
            }
        }

        let mut turn = input.turn;
        let sticky_look = enemy_ahead(
            ctx.physics,
            body.position,
            self.camera.get().forwards(),
            self.config.enemy_ahead_range,
            ctx.entity,
        );
        if sticky_look {
            turn *= self.config.sticky_look_factor;
        }
        if turn != 0.0 {
            let rotation = turn * self.config.turn_speed * dt;
            if let Err(err) = ctx.physics.set_transform(ctx.entity, body.position, body.angle + rotation) {
                log::warn!("Player::handle_input: {}", err);
            }
        }

        let rate = self.config.debug_damage_rate;
        if input.is_down(Key::DamageUp) {
            self.damage += rate * dt;
        }
        if input.is_down(Key::DamageDown) {
            self.damage = (self.damage - rate * dt).max(0.0);
        }
        if input.just_down(Key::ToggleCannotDie) {
            self.cannot_die = !self.cannot_die;
            log::info!("Player::handle_input: cannot_die = {}", self.cannot_die);
        }

        let aim = self.camera.get().forwards();
        if let Some(weapon) = &mut self.weapon {
            weapon.handle_input(input, ctx, aim, dt);
        }
    }

    fn on_step(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> BehaviorCommand {
        self.status.tick(dt, &mut self.damage, ctx.render);

        if !self.cannot_die && self.damage >= self.config.damage_max {
            log::debug!("Player::on_step: Oh no! Taken {} damage", self.damage);
            return BehaviorCommand::ReplaceWith(Box::new(DeadPlayer::new(
                &self.camera,
                self.config.death_camera_drop,
            )));
        }

        if let Some(body) = ctx.body() {
            self.camera.follow(body.position, body.angle);
            ctx.audio.update_listener(body.position, body.angle);
        }

        BehaviorCommand::Continue
    }

    fn on_begin_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if let Some(kind) = contact.other_kind {
            log::debug!("Player::on_begin_contact: Touching {}", kind);
        }

        if contact.other_is_enemy_projectile() && self.hits.begin(contact.own.handle, contact.other.handle) {
            log::debug!("Player::on_begin_contact: Taking damage");
            self.damage += self.config.enemy_projectile_damage;
        }

        self.status.on_begin_contact(&contact.other);
        BehaviorCommand::Continue
    }

    fn on_end_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        self.hits.end(contact.own.handle, contact.other.handle);
        self.status.on_end_contact(&contact.other);
        BehaviorCommand::Continue
    }

    fn save(&self, _animations: &AnimationLibrary) -> Value {
        let mut data = json!({
            "MoveSpeed": self.config.move_speed,
            "Camera": self.camera.get(),
        });
        if let Some(weapon) = &self.weapon {
            data["Quiver"] = json!(weapon.quiver());
        }
        data
    }

    fn load(&mut self, data: &Value, _animations: &AnimationLibrary) {
        if let Some(speed) = read_field(data, "MoveSpeed") {
            self.config.move_speed = speed;
        }
        if let Some(camera) = read_field(data, "Camera") {
            self.camera.set(camera);
        }
        if let Some(quiver) = read_field(data, "Quiver") {
            if let Some(weapon) = &mut self.weapon {
                weapon.set_quiver(quiver);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
