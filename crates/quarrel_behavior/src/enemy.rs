//! Ranged enemy: wakes when it sees the player, then shoots on a cooldown

use crate::audio::play_clip;
use crate::behavior::{Behavior, BehaviorCommand, Contact};
use crate::config::EnemyConfig;
use crate::context::BehaviorContext;
use crate::kind::BehaviorKind;
use crate::persist::{animation_from_json, animation_to_json};
use crate::projectile::ProjectileDesc;
use glam::Vec2;
use quarrel_ai::{find_player, StateChange, StateMachine};
use quarrel_anim::{AnimationChain, AnimationId, AnimationLibrary, RepeatPolicy};
use quarrel_combat::{ContactPairs, DamageCount};
use quarrel_core::WeakEntityRef;
use quarrel_physics::{backend, FixtureCategories, FixtureDesc, FixtureHandle};
use serde_json::{json, Value};
use std::any::Any;

/// Where an enemy is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// Hasn't seen the player yet
    Dormant,
    /// Playing the wake-up animation
    Awakening,
    /// Shooting whenever it can
    Aggro,
    /// Terminal
    Dying,
}

/// What the enemy knows at the start of a step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemySenses {
    /// Player position, if in range and in sight
    pub player: Option<Vec2>,
    /// An awake or shoot animation is showing
    pub busy: bool,
    pub damage_exceeded: bool,
}

/// Animation bindings of an enemy sprite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyAnimations {
    pub run: AnimationId,
    pub shoot: AnimationId,
    pub stand: AnimationId,
    pub die: AnimationId,
    pub awake: AnimationId,
}

fn enemy_state_machine() -> StateMachine<EnemyState, EnemySenses> {
    let mut fsm = StateMachine::new(EnemyState::Dormant);
    fsm.add_global_transition(EnemyState::Dying, |senses: &EnemySenses| senses.damage_exceeded);
    fsm.add_transition(EnemyState::Dormant, EnemyState::Awakening, |senses: &EnemySenses| {
        senses.player.is_some()
    });
    fsm.add_transition(EnemyState::Awakening, EnemyState::Aggro, |senses: &EnemySenses| {
        !senses.busy
    });
    fsm
}

pub struct Enemy {
    fsm: StateMachine<EnemyState, EnemySenses>,
    damage: DamageCount,
    hits: ContactPairs,
    last_shoot_time: f32,
    animations: EnemyAnimations,
    sensor: Option<FixtureHandle>,
    player_in_sensor: WeakEntityRef,
    config: EnemyConfig,
}

impl Enemy {
    /// Attach to `ctx.entity`: tag its body as an enemy and add the
    /// player-detection sensor
    pub fn new(ctx: &mut BehaviorContext<'_>, config: &EnemyConfig) -> Self {
        if let Err(err) = backend::tag_primary_fixture(ctx.physics, ctx.entity, FixtureCategories::ENEMY) {
            log::warn!("Enemy::new: Couldn't tag {} as enemy: {}", ctx.entity, err);
        }

        let desc = FixtureDesc::sensor(config.sensor_radius)
            .with_categories(FixtureCategories::SENSOR)
            .with_mask(FixtureCategories::PLAYER);
        let sensor = match ctx.physics.create_fixture(ctx.entity, desc) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("Enemy::new: Couldn't create sensor: {}", err);
                None
            }
        };

        Self {
            fsm: enemy_state_machine(),
            damage: DamageCount::new(config.damage_limit),
            hits: ContactPairs::new(),
            last_shoot_time: 0.0,
            animations: EnemyAnimations::default(),
            sensor,
            player_in_sensor: WeakEntityRef::empty(),
            config: config.clone(),
        }
    }

    pub fn with_animations(mut self, animations: EnemyAnimations) -> Self {
        self.animations = animations;
        self
    }

    pub fn state(&self) -> EnemyState {
        *self.fsm.current()
    }

    pub fn damage(&self) -> &DamageCount {
        &self.damage
    }

    pub fn animations(&self) -> &EnemyAnimations {
        &self.animations
    }

    pub fn sensor(&self) -> Option<FixtureHandle> {
        self.sensor
    }

    /// Player currently inside the sensor, without resolving it
    pub fn player_in_sensor(&self) -> &WeakEntityRef {
        &self.player_in_sensor
    }

    pub fn last_shoot_time(&self) -> f32 {
        self.last_shoot_time
    }

    fn is_busy(&self, ctx: &BehaviorContext<'_>) -> bool {
        ctx.animator
            .current_animation()
            .is_some_and(|current| current == self.animations.awake || current == self.animations.shoot)
    }

    fn sense(&mut self, ctx: &BehaviorContext<'_>) -> EnemySenses {
        if self.damage.exceeded() {
            return EnemySenses {
                damage_exceeded: true,
                ..Default::default()
            };
        }

        let player = self
            .player_in_sensor
            .get(ctx.entities)
            .and_then(|player| ctx.position_of(player))
            .and_then(|target| {
                let position = ctx.position()?;
                find_player(&*ctx.physics, position, target, ctx.entity)
            });

        EnemySenses {
            player,
            busy: self.is_busy(ctx),
            damage_exceeded: false,
        }
    }

    fn can_shoot(&self, senses: &EnemySenses, time: f32) -> bool {
        !senses.busy && time - self.last_shoot_time > self.config.shoot_cooldown
    }

    fn wake_up(&mut self, ctx: &mut BehaviorContext<'_>) {
        log::debug!("Enemy::wake_up: {} saw the player", ctx.entity);
        if ctx.animator.current_animation() == Some(self.animations.awake) {
            return;
        }
        ctx.play(
            &AnimationChain::new(self.animations.awake, RepeatPolicy::Never)
                .then(self.animations.stand, RepeatPolicy::Forever),
        );
    }

    fn shoot(&mut self, ctx: &mut BehaviorContext<'_>, target: Vec2) {
        let Some(position) = ctx.position() else {
            return;
        };

        log::debug!("Enemy::shoot: {} firing at {}", ctx.entity, target);
        self.last_shoot_time = ctx.time;
        ctx.play(
            &AnimationChain::new(self.animations.shoot, RepeatPolicy::Never)
                .then(self.animations.stand, RepeatPolicy::Forever),
        );
        play_clip(ctx.audio, ctx.entity, &self.config.shoot_clip);
        ctx.spawn(ProjectileDesc::enemy(
            position,
            target - position,
            self.config.projectile_speed,
            self.config.projectile_colour,
        ));
    }

    fn die(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        log::debug!("Enemy::die: {} took {} damage", ctx.entity, self.damage.current());
        ctx.play(&AnimationChain::new(self.animations.die, RepeatPolicy::Never));
        if let Some(sensor) = self.sensor.take() {
            if let Err(err) = ctx.physics.destroy_fixture(sensor) {
                log::warn!("Enemy::die: Couldn't remove sensor: {}", err);
            }
        }
        BehaviorCommand::RemoveSelf
    }
}

impl Behavior for Enemy {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Enemy
    }

    fn on_step(&mut self, ctx: &mut BehaviorContext<'_>, _dt: f32) -> BehaviorCommand {
        let senses = self.sense(ctx);

        match self.fsm.update(&senses) {
            Some(StateChange {
                to: EnemyState::Dying,
                ..
            }) => return self.die(ctx),
            Some(StateChange {
                to: EnemyState::Awakening,
                ..
            }) => {
                self.wake_up(ctx);
                return BehaviorCommand::Continue;
            }
            _ => {}
        }

        if let Some(target) = senses.player {
            if self.fsm.is_in(&EnemyState::Aggro) && self.can_shoot(&senses, ctx.time) {
                self.shoot(ctx, target);
            }
        }

        BehaviorCommand::Continue
    }

    fn on_begin_contact(&mut self, contact: &Contact, ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if contact.is_own(self.sensor) {
            if contact.other.categories().intersects(FixtureCategories::PLAYER) {
                log::debug!("Enemy::on_begin_contact: {} in range of {}", contact.other_entity(), ctx.entity);
                self.player_in_sensor.set(contact.other_entity());
            }
            return BehaviorCommand::Continue;
        }

        if contact.other_is_player_projectile() && self.hits.begin(contact.own.handle, contact.other.handle) {
            self.damage.add(self.config.bolt_damage);
            log::debug!(
                "Enemy::on_begin_contact: {} hit, damage {}/{}",
                ctx.entity,
                self.damage.current(),
                self.damage.limit()
            );
        }

        BehaviorCommand::Continue
    }

    fn on_end_contact(&mut self, contact: &Contact, _ctx: &mut BehaviorContext<'_>) -> BehaviorCommand {
        if contact.is_own(self.sensor) {
            if self.player_in_sensor.is(contact.other_entity()) {
                log::debug!("Enemy::on_end_contact: {} left range", contact.other_entity());
                self.player_in_sensor.clear();
            }
            return BehaviorCommand::Continue;
        }

        self.hits.end(contact.own.handle, contact.other.handle);
        BehaviorCommand::Continue
    }

    fn save(&self, animations: &AnimationLibrary) -> Value {
        json!({
            "RunAnim": animation_to_json(animations, self.animations.run),
            "ShootAnim": animation_to_json(animations, self.animations.shoot),
            "IdleAnim": animation_to_json(animations, self.animations.stand),
            "DieAnim": animation_to_json(animations, self.animations.die),
            "AwakeAnim": animation_to_json(animations, self.animations.awake),
        })
    }

    fn load(&mut self, data: &Value, animations: &AnimationLibrary) {
        self.animations = EnemyAnimations {
            run: animation_from_json(animations, data, "RunAnim"),
            shoot: animation_from_json(animations, data, "ShootAnim"),
            stand: animation_from_json(animations, data, "IdleAnim"),
            die: animation_from_json(animations, data, "DieAnim"),
            awake: animation_from_json(animations, data, "AwakeAnim"),
        };
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen() -> EnemySenses {
        EnemySenses {
            player: Some(Vec2::new(3.0, 0.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_stays_dormant_without_sight() {
        let mut fsm = enemy_state_machine();
        assert_eq!(fsm.update(&EnemySenses::default()), None);
        assert!(fsm.is_in(&EnemyState::Dormant));
    }

    #[test]
    fn test_wakes_then_aggro_once_idle() {
        let mut fsm = enemy_state_machine();

        let change = fsm.update(&seen());
        assert_eq!(change.map(|c| c.to), Some(EnemyState::Awakening));

        let busy = EnemySenses { busy: true, ..seen() };
        assert_eq!(fsm.update(&busy), None);

        let change = fsm.update(&EnemySenses::default());
        assert_eq!(change.map(|c| c.to), Some(EnemyState::Aggro));
    }

    #[test]
    fn test_dying_from_any_state() {
        let dying = EnemySenses {
            damage_exceeded: true,
            ..seen()
        };

        let mut fsm = enemy_state_machine();
        assert_eq!(fsm.update(&dying).map(|c| c.to), Some(EnemyState::Dying));

        let mut fsm = enemy_state_machine();
        fsm.update(&seen());
        fsm.update(&EnemySenses::default());
        assert!(fsm.is_in(&EnemyState::Aggro));
        assert_eq!(fsm.update(&dying).map(|c| c.to), Some(EnemyState::Dying));
        assert_eq!(fsm.update(&dying), None);
    }
}
