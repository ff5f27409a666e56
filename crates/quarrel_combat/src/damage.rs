//! Damage accumulation

use serde::{Deserialize, Serialize};

/// Anything damage can be added to
pub trait DamageSink {
    /// Add `amount` damage
    fn add_damage(&mut self, amount: u32);
}

/// Bounded damage counter.
///
/// Only ever grows after construction. [`exceeded`](Self::exceeded) turns true
/// once `current >= limit` and, since nothing decreases the count, stays true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageCount {
    current: u32,
    limit: u32,
}

impl DamageCount {
    /// Empty counter with `limit` (clamped to at least 1)
    pub fn new(limit: u32) -> Self {
        Self {
            current: 0,
            limit: limit.max(1),
        }
    }

    /// Accumulated damage
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Configured limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Add damage, saturating at `u32::MAX`
    pub fn add(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }

    /// Whether the accumulated damage reached the limit
    pub fn exceeded(&self) -> bool {
        self.current >= self.limit
    }

    /// Accumulated damage as a fraction of the limit
    pub fn ratio(&self) -> f32 {
        self.current as f32 / self.limit as f32
    }
}

impl DamageSink for DamageCount {
    fn add_damage(&mut self, amount: u32) {
        self.add(amount);
    }
}

/// Plain float damage, used by the player
impl DamageSink for f32 {
    fn add_damage(&mut self, amount: u32) {
        *self += amount as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeded_at_limit() {
        let mut damage = DamageCount::new(10);
        assert!(!damage.exceeded());
        damage.add(9);
        assert!(!damage.exceeded());
        damage.add(1);
        assert!(damage.exceeded());
        damage.add(5);
        assert!(damage.exceeded());
        assert_eq!(damage.current(), 15);
    }

    #[test]
    fn test_never_decreases() {
        let mut damage = DamageCount::new(30);
        let mut last = damage.current();
        for amount in [0, 5, 0, 10, u32::MAX, 3] {
            damage.add(amount);
            assert!(damage.current() >= last);
            last = damage.current();
        }
        assert_eq!(damage.current(), u32::MAX);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let damage = DamageCount::new(0);
        assert_eq!(damage.limit(), 1);
        assert!(!damage.exceeded());
    }

    #[test]
    fn test_float_sink() {
        let mut damage = 95.0f32;
        damage.add_damage(20);
        assert_eq!(damage, 115.0);
    }
}
