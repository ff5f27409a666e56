//! Hazard surfaces currently touching an entity

use quarrel_physics::{FixtureCategories, FixtureHandle, FixtureInfo};
use std::collections::HashSet;

/// Set of touching hazard fixtures.
///
/// Keyed by fixture handle: a repeated begin for the same fixture is a
/// no-op and a single end removes it. Distinct hazard fixtures are tracked
/// separately but do not stack anything on their own.
#[derive(Debug, Clone)]
pub struct HazardContacts {
    touching: HashSet<FixtureHandle>,
    hazard: FixtureCategories,
}

impl HazardContacts {
    /// Track fixtures in the `Fire` category
    pub fn new() -> Self {
        Self::with_categories(FixtureCategories::FIRE)
    }

    /// Track fixtures in any of `hazard`
    pub fn with_categories(hazard: FixtureCategories) -> Self {
        Self {
            touching: HashSet::new(),
            hazard,
        }
    }

    fn is_hazard(&self, fixture: &FixtureInfo) -> bool {
        fixture.categories().intersects(self.hazard)
    }

    /// Begin contact with `other`; ignored unless it is a hazard.
    ///
    /// Returns true if `other` was newly added.
    pub fn begin(&mut self, other: &FixtureInfo) -> bool {
        if !self.is_hazard(other) {
            return false;
        }
        self.touching.insert(other.handle)
    }

    /// End contact with `other`. Returns true if it was tracked.
    pub fn end(&mut self, other: &FixtureInfo) -> bool {
        self.touching.remove(&other.handle)
    }

    pub fn contains(&self, fixture: FixtureHandle) -> bool {
        self.touching.contains(&fixture)
    }

    pub fn len(&self) -> usize {
        self.touching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

impl Default for HazardContacts {
    fn default() -> Self {
        Self::new()
    }
}
