//! Damage-bearing contacts currently touching an entity

use quarrel_physics::FixtureHandle;
use std::collections::HashSet;

/// Set of `(own, other)` fixture pairs that have already dealt damage.
///
/// A begin for a pair that is still touching returns false, so a repeated
/// begin notification cannot apply its damage twice. The pair is released
/// on end.
#[derive(Debug, Clone, Default)]
pub struct ContactPairs {
    touching: HashSet<(FixtureHandle, FixtureHandle)>,
}

impl ContactPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin contact. Returns true if the pair was not already touching.
    pub fn begin(&mut self, own: FixtureHandle, other: FixtureHandle) -> bool {
        self.touching.insert((own, other))
    }

    /// End contact. Returns true if the pair was tracked.
    pub fn end(&mut self, own: FixtureHandle, other: FixtureHandle) -> bool {
        self.touching.remove(&(own, other))
    }

    pub fn contains(&self, own: FixtureHandle, other: FixtureHandle) -> bool {
        self.touching.contains(&(own, other))
    }

    pub fn len(&self) -> usize {
        self.touching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }
}
