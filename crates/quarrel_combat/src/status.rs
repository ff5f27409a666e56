//! The per-tick status pipeline shared by every damageable behavior.
//!
//! Each tick runs, in order:
//!
//! 1. hazards -> effects: touching a hazard adds (or refreshes) Burning
//! 2. effects advance; every completed interval applies damage and a visual cue
//! 3. expired effects are pruned
//! 4. the owner checks its damage against its limit
//!
//! Stage 4 belongs to the owner since only it knows what replaces it.

use crate::bolt::BoltPayload;
use crate::colour::Colour;
use crate::damage::DamageSink;
use crate::effect::{ActiveEffect, ActiveEffectSet, ActiveEffectType, EffectRegistry};
use crate::hazard::HazardContacts;
use quarrel_physics::FixtureInfo;

/// Render-side reaction to effects
pub trait EffectVisual {
    /// An effect completed an interval
    fn show_effect(&mut self, effect: &ActiveEffect);

    /// The last effect expired
    fn clear_effects(&mut self);
}

/// Ignores visuals
impl EffectVisual for () {
    fn show_effect(&mut self, _effect: &ActiveEffect) {}

    fn clear_effects(&mut self) {}
}

/// Tints a colour while effects are active
impl EffectVisual for Colour {
    fn show_effect(&mut self, effect: &ActiveEffect) {
        *self = effect.spec().tint;
    }

    fn clear_effects(&mut self) {
        *self = Colour::default();
    }
}

/// What one pipeline tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Damage applied by effects
    pub damage: u32,
    /// Effects pruned
    pub expired: usize,
}

/// Hazard contacts plus active effects of one entity
#[derive(Debug, Clone, Default)]
pub struct CombatStatus {
    hazards: HazardContacts,
    effects: ActiveEffectSet,
    registry: EffectRegistry,
}

impl CombatStatus {
    pub fn new(registry: EffectRegistry) -> Self {
        Self {
            hazards: HazardContacts::new(),
            effects: ActiveEffectSet::new(),
            registry,
        }
    }

    pub fn hazards(&self) -> &HazardContacts {
        &self.hazards
    }

    pub fn effects(&self) -> &ActiveEffectSet {
        &self.effects
    }

    /// Begin contact; hazard fixtures are tracked
    pub fn on_begin_contact(&mut self, other: &FixtureInfo) {
        if self.hazards.begin(other) {
            log::debug!("CombatStatus::on_begin_contact: Touching hazard {:?}", other.handle);
        }
    }

    /// End contact; hazard fixtures are forgotten
    pub fn on_end_contact(&mut self, other: &FixtureInfo) {
        if self.hazards.end(other) {
            log::debug!("CombatStatus::on_end_contact: Left hazard {:?}", other.handle);
        }
    }

    /// Apply a bolt hit: its damage now, its effect from the next tick on
    pub fn on_bolt_hit(&mut self, payload: &BoltPayload, sink: &mut dyn DamageSink) {
        sink.add_damage(payload.damage);
        if let Some(effect) = payload.effect {
            self.add_effect(effect);
        }
    }

    /// Add or refresh an effect
    pub fn add_effect(&mut self, kind: ActiveEffectType) {
        self.effects.add(kind, &self.registry);
    }

    /// Run stages 1 to 3 of the pipeline
    pub fn tick(
        &mut self,
        dt: f32,
        sink: &mut dyn DamageSink,
        visual: &mut dyn EffectVisual,
    ) -> StatusTick {
        let mut report = StatusTick::default();

        if !self.hazards.is_empty() {
            self.add_effect(ActiveEffectType::Burning);
        }

        for effect in self.effects.iter_mut() {
            let completed = effect.update(dt);
            if completed == 0 {
                continue;
            }
            let damage = effect.spec().damage.saturating_mul(completed);
            sink.add_damage(damage);
            visual.show_effect(effect);
            report.damage = report.damage.saturating_add(damage);
        }

        report.expired = self.effects.prune();
        if report.expired > 0 && self.effects.is_empty() {
            visual.clear_effects();
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageCount;
    use quarrel_core::Entity;
    use quarrel_physics::{FixtureCategories, FixtureFilter, FixtureHandle};

    fn fire() -> FixtureInfo {
        FixtureInfo {
            handle: FixtureHandle(9),
            entity: Entity::new(9, 0),
            radius: 1.0,
            is_sensor: false,
            filter: FixtureFilter::new(FixtureCategories::FIRE, FixtureCategories::ALL),
        }
    }

    #[test]
    fn test_hazard_starts_burning() {
        let mut status = CombatStatus::default();
        let mut damage = DamageCount::new(30);
        let mut tint = Colour::WHITE;

        status.on_begin_contact(&fire());
        status.tick(0.25, &mut damage, &mut tint);
        assert!(status.effects().contains(ActiveEffectType::Burning));
        assert_eq!(damage.current(), 0);

        let report = status.tick(0.25, &mut damage, &mut tint);
        assert_eq!(report.damage, 5);
        assert_eq!(damage.current(), 5);
        assert_eq!(tint, Colour::ORANGE);
    }

    #[test]
    fn test_burning_runs_out_after_leaving() {
        let mut status = CombatStatus::default();
        let mut damage = 0.0f32;
        let mut tint = Colour::WHITE;

        status.on_begin_contact(&fire());
        status.tick(0.0, &mut damage, &mut tint);
        status.on_end_contact(&fire());

        let mut total = 0;
        for _ in 0..30 {
            total += status.tick(0.25, &mut damage, &mut tint).damage;
        }
        // 3s of burning at 5 per 0.5s
        assert_eq!(total, 30);
        assert_eq!(damage, 30.0);
        assert!(status.effects().is_empty());
        assert_eq!(tint, Colour::WHITE);
    }

    #[test]
    fn test_staying_in_fire_keeps_refreshing() {
        let mut status = CombatStatus::default();
        let mut damage = DamageCount::new(1000);

        status.on_begin_contact(&fire());
        for _ in 0..40 {
            status.tick(0.25, &mut damage, &mut ());
        }
        assert_eq!(status.effects().len(), 1);
        assert_eq!(damage.current(), 100);
    }

    #[test]
    fn test_bolt_hit() {
        let mut status = CombatStatus::default();
        let mut damage = DamageCount::new(30);
        status.on_bolt_hit(
            &BoltPayload::new(10).with_effect(ActiveEffectType::Burning),
            &mut damage,
        );
        assert_eq!(damage.current(), 10);
        assert!(status.effects().contains(ActiveEffectType::Burning));
    }

    #[test]
    fn test_expired_effect_is_not_processed_again() {
        let mut status = CombatStatus::default();
        let mut damage = DamageCount::new(1000);
        status.add_effect(ActiveEffectType::Burning);

        let report = status.tick(3.0, &mut damage, &mut ());
        assert_eq!(report.expired, 1);
        assert_eq!(damage.current(), 30);

        let report = status.tick(1.0, &mut damage, &mut ());
        assert_eq!(report, StatusTick::default());
        assert_eq!(damage.current(), 30);
    }
}
