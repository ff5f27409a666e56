//! Timed status effects

use crate::colour::Colour;
use serde::{Deserialize, Serialize};

/// Kind of status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveEffectType {
    /// Periodic fire damage
    Burning,
}

impl ActiveEffectType {
    /// Stable name used in persisted documents
    pub fn name(self) -> &'static str {
        match self {
            Self::Burning => "Burning",
        }
    }
}

/// Duration and per-tick rule of one effect kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSpec {
    /// Seconds the effect lasts once added (or refreshed)
    pub duration: f32,
    /// Seconds between damage applications
    pub interval: f32,
    /// Damage applied per completed interval
    pub damage: u32,
    /// Render tint while active
    pub tint: Colour,
}

impl EffectSpec {
    /// Default Burning rule
    pub const BURNING: Self = Self {
        duration: 3.0,
        interval: 0.5,
        damage: 5,
        tint: Colour::ORANGE,
    };
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self::BURNING
    }
}

/// Catalog of effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectRegistry {
    pub burning: EffectSpec,
}

impl EffectRegistry {
    /// Rule for `kind`
    pub fn spec(&self, kind: ActiveEffectType) -> EffectSpec {
        match kind {
            ActiveEffectType::Burning => self.burning,
        }
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self {
            burning: EffectSpec::BURNING,
        }
    }
}

/// One running effect on an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    kind: ActiveEffectType,
    spec: EffectSpec,
    remaining: f32,
    since_tick: f32,
}

impl ActiveEffect {
    /// Start an effect with its full duration
    pub fn new(kind: ActiveEffectType, spec: EffectSpec) -> Self {
        Self {
            kind,
            spec,
            remaining: spec.duration.max(0.0),
            since_tick: 0.0,
        }
    }

    pub fn kind(&self) -> ActiveEffectType {
        self.kind
    }

    pub fn spec(&self) -> &EffectSpec {
        &self.spec
    }

    /// Seconds until expiry
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restore the full duration; interval progress is kept
    pub fn refresh(&mut self, spec: EffectSpec) {
        self.spec = spec;
        self.remaining = self.remaining.max(spec.duration);
    }

    /// Advance by `dt`, returning how many tick intervals completed.
    ///
    /// Time past the remaining duration does not count toward intervals.
    pub fn update(&mut self, dt: f32) -> u32 {
        if self.is_expired() {
            return 0;
        }

        let live = dt.max(0.0).min(self.remaining);
        self.remaining = (self.remaining - live).max(0.0);

        if self.spec.interval <= 0.0 {
            return 0;
        }

        self.since_tick += live;
        let mut completed = 0;
        while self.since_tick >= self.spec.interval {
            self.since_tick -= self.spec.interval;
            completed += 1;
        }
        completed
    }
}

/// Effects on one entity, unique by kind, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffectSet {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `kind`, refreshing it if already active.
    ///
    /// Returns true if a new entry was created.
    pub fn add(&mut self, kind: ActiveEffectType, registry: &EffectRegistry) -> bool {
        let spec = registry.spec(kind);
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.refresh(spec);
            return false;
        }
        log::debug!("ActiveEffectSet::add: {}", kind.name());
        self.effects.push(ActiveEffect::new(kind, spec));
        true
    }

    pub fn contains(&self, kind: ActiveEffectType) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: ActiveEffectType) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActiveEffect> {
        self.effects.iter_mut()
    }

    /// Drop expired effects, returning how many were removed
    pub fn prune(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.is_expired());
        before - self.effects.len()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
