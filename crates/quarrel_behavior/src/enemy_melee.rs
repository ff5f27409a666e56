//! Melee enemy: chases whatever walks into its sensor, hopping as it goes

use crate::behavior::{Behavior, BehaviorCommand, Contact};
use crate::config::{BehaviorConfig, MeleeConfig};
use crate::context::BehaviorContext;
use crate::kind::BehaviorKind;
use crate::persist::read_field;
use quarrel_anim::AnimationLibrary;
use quarrel_combat::{CombatStatus, ContactPairs, DamageCount};
use quarrel_core::WeakEntityRef;
use quarrel_physics::{backend, FixtureCategories, FixtureDesc, FixtureHandle, GroundMotion};
use serde_json::{json, Value};
use std::any::Any;

pub struct EnemyMelee {
    status: CombatStatus,
    damage: DamageCount,
    hits: ContactPairs,
    motion: GroundMotion,
    sensor: Option<FixtureHandle>,
    target: WeakEntityRef,
    config: MeleeConfig,
}

impl EnemyMelee {
    pub fn new(ctx: &mut BehaviorContext<'_>, config: &BehaviorConfig) -> Self {
        if let Err(err) = backend::tag_primary_fixture(ctx.physics, ctx.entity, FixtureCategories::ENEMY) {
            log::warn!("EnemyMelee::new: Couldn't tag {} as enemy: {}", ctx.entity, err);
        }

        let desc = FixtureDesc::sensor(config.melee.sensor_radius)
            .with_categories(FixtureCategories::SENSOR)
            .with_mask(FixtureCategories::PLAYER);
        let sensor = ctx
            .physics
            .create_fixture(ctx.entity, desc)
            .map_err(|err| log::warn!("EnemyMelee::new: Couldn't create sensor: {}", err))
            .ok();

        Self {
            status: CombatStatus::new(config.effects),
            damage: DamageCount::new(config.melee.damage_limit),
            hits: ContactPairs::new(),
            motion: GroundMotion::new(),
            sensor,
            target: WeakEntityRef::empty(),
            config: config.melee.clone(),
        }
    }

    pub fn damage(&self) -> &DamageCount {
        &self.damage
    }

    pub fn status(&self) -> &CombatStatus {
        &self.status
    }

    pub fn target(&self) -> &WeakEntityRef {
        &self.target
    }

    pub fn sensor(&self) -> Option<FixtureHandle> {
        self.sensor
    }

    pub fn up_velocity(&self) -> f32 {
        self.motion.up_velocity
    }

    fn pursue(&mut self, ctx: &mut BehaviorContext<'_>) {
        let Some(target) = self.target.get(ctx.entities) else {
            return;
        };
        let (Some(position), Some(goal)) = (ctx.position(), ctx.position_of(target)) else {
            return;
        };

        let velocity = (goal - position).normalize_or_zero() * self.config.move_speed;
        if let Err(err) = ctx.physics.set_linear_velocity(ctx.entity, velocity) {
            log::warn!("EnemyMelee::pursue: {}", err);
        }

        if GroundMotion::is_grounded(ctx.render.ground_offset) {
            self.motion.jump(self.config.jump_velocity);
        }
    }
}

impl Behavior for EnemyMelee {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::EnemyMelee
    }

    fn on_step(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> BehaviorCommand {
        self.status.tick(dt, &mut self.damage, ctx.render);

        if self.damage.exceeded() {
            log::debug!("EnemyMelee::on_step: {} destroyed", ctx.entity);
            if let Some(sensor) = self.sensor.take() {
                if let Err(err) = ctx.physics.destroy_fixture(sensor) {
                    log::warn!("EnemyMelee::on_step: Couldn't remove sensor: {}", err);
                }
            }
            return BehaviorCommand::RemoveSelf;
        }

        self.pursue(ctx);
        ctx.render.ground_offset = self.motion.step(ctx.render.ground_offset, ctx.gravity, dt);

        BehaviorCommand::Continue
    }

    fn on_begin_contact(&mut self, contact: &Contact, ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if contact.is_own(self.sensor) {
            if self.target.get(ctx.entities).is_none() {
                log::debug!("EnemyMelee::on_begin_contact: {} targets {}", ctx.entity, contact.other_entity());
                self.target.set(contact.other_entity());
            }
            return BehaviorCommand::Continue;
        }

        if contact.other_is_player_projectile() && self.hits.begin(contact.own.handle, contact.other.handle) {
            let payload = contact.other_bolt.unwrap_or_default();
            self.status.on_bolt_hit(&payload, &mut self.damage);
            log::debug!(
                "EnemyMelee::on_begin_contact: {} hit, damage {}/{}",
                ctx.entity,
                self.damage.current(),
                self.damage.limit()
            );
        }

        self.status.on_begin_contact(&contact.other);
        BehaviorCommand::Continue
    }

    fn on_end_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if contact.is_own(self.sensor) {
            if self.target.is(contact.other_entity()) {
                self.target.clear();
            }
            return BehaviorCommand::Continue;
        }

        self.hits.end(contact.own.handle, contact.other.handle);
        self.status.on_end_contact(&contact.other);
        BehaviorCommand::Continue
    }

    fn save(&self, _animations: &AnimationLibrary) -> Value {
        json!({
            "MoveSpeed": self.config.move_speed,
            "JumpVelocity": self.config.jump_velocity,
        })
    }

    fn load(&mut self, data: &Value, _animations: &AnimationLibrary) {
        if let Some(speed) = read_field(data, "MoveSpeed") {
            self.config.move_speed = speed;
        }
        if let Some(velocity) = read_field(data, "JumpVelocity") {
            self.config.jump_velocity = velocity;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
