//! Fixture handles and descriptors

use crate::layers::{FixtureCategories, FixtureFilter};
use quarrel_core::Entity;
use serde::{Deserialize, Serialize};

/// Handle to a fixture owned by the host physics world.
///
/// Identity comparison on handles is how behaviors tell their own sensor
/// apart from their solid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureHandle(pub u32);

impl FixtureHandle {
    /// Raw id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Description of a circular fixture to attach to a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureDesc {
    /// Circle radius
    pub radius: f32,
    /// Sensors report contacts but never resolve them
    pub is_sensor: bool,
    /// Category/mask filter
    pub filter: FixtureFilter,
}

impl FixtureDesc {
    /// Solid circle in the default category
    pub fn circle(radius: f32) -> Self {
        Self {
            radius,
            is_sensor: false,
            filter: FixtureFilter::DEFAULT,
        }
    }

    /// Sensor circle in the sensor category
    pub fn sensor(radius: f32) -> Self {
        Self {
            radius,
            is_sensor: true,
            filter: FixtureFilter::new(FixtureCategories::SENSOR, FixtureCategories::ALL),
        }
    }

    /// Replace the categories
    pub fn with_categories(mut self, categories: FixtureCategories) -> Self {
        self.filter.categories = categories;
        self
    }

    /// Replace the mask
    pub fn with_mask(mut self, mask: FixtureCategories) -> Self {
        self.filter.mask = mask;
        self
    }
}

/// Snapshot of a live fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureInfo {
    /// The fixture
    pub handle: FixtureHandle,
    /// Owning entity
    pub entity: Entity,
    /// Circle radius
    pub radius: f32,
    /// Whether this is a sensor
    pub is_sensor: bool,
    /// Category/mask filter
    pub filter: FixtureFilter,
}

impl FixtureInfo {
    /// Categories of this fixture
    pub fn categories(&self) -> FixtureCategories {
        self.filter.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_desc() {
        let desc = FixtureDesc::sensor(5.0).with_mask(FixtureCategories::PLAYER);
        assert!(desc.is_sensor);
        assert_eq!(desc.filter.categories, FixtureCategories::SENSOR);
        assert_eq!(desc.filter.mask, FixtureCategories::PLAYER);
    }

    #[test]
    fn test_circle_desc() {
        let desc = FixtureDesc::circle(0.1).with_categories(FixtureCategories::PROJECTILE);
        assert!(!desc.is_sensor);
        assert_eq!(desc.filter.categories, FixtureCategories::PROJECTILE);
        assert_eq!(desc.filter.mask, FixtureCategories::ALL);
    }
}
