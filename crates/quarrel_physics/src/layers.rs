//! Fixture categories and filtering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Bitmask of fixture categories
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixtureCategories(pub u16);

impl FixtureCategories {
    /// No categories
    pub const NONE: Self = Self(0);
    /// Plain world geometry
    pub const DEFAULT: Self = Self(1 << 0);
    /// The player's body
    pub const PLAYER: Self = Self(1 << 1);
    /// Awareness volumes, never damage-bearing
    pub const SENSOR: Self = Self(1 << 2);
    /// Any projectile
    pub const PROJECTILE: Self = Self(1 << 3);
    /// The player's crossbow bolts
    pub const CROSSBOW_BOLT: Self = Self(1 << 4);
    /// Enemy bodies
    pub const ENEMY: Self = Self(1 << 5);
    /// Burning surfaces
    pub const FIRE: Self = Self(1 << 6);
    /// Set by the host renderer. Behaviors must not touch it.
    pub const RENDER_ONLY: Self = Self(1 << 15);
    /// Every category
    pub const ALL: Self = Self(u16::MAX);

    /// Raw bits
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Display name of a single category bit, if it has one
    pub fn bit_name(bit: u32) -> Option<&'static str> {
        FILTER_BIT_NAMES.get(bit as usize).copied().flatten()
    }
}

/// Names shown for each category bit (editor and logs)
const FILTER_BIT_NAMES: [Option<&str>; 16] = [
    Some("Default"),
    Some("Player"),
    Some("Sensor"),
    Some("Projectile"),
    Some("CrossbowBolt"),
    Some("Enemy"),
    Some("Fire"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("RenderOnly"),
];

impl BitOr for FixtureCategories {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FixtureCategories {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FixtureCategories {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for FixtureCategories {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for FixtureCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = (0..16)
            .filter(|bit| self.0 & (1 << bit) != 0)
            .map(|bit| Self::bit_name(bit).unwrap_or("?"))
            .collect();
        write!(f, "FixtureCategories({})", names.join(" | "))
    }
}

/// Category membership plus the mask of categories a fixture reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFilter {
    /// Which categories this fixture belongs to
    pub categories: FixtureCategories,
    /// Which categories this fixture can touch
    pub mask: FixtureCategories,
}

impl FixtureFilter {
    /// Default-category fixture that touches everything
    pub const DEFAULT: Self = Self {
        categories: FixtureCategories::DEFAULT,
        mask: FixtureCategories::ALL,
    };

    /// Create a new filter
    pub const fn new(categories: FixtureCategories, mask: FixtureCategories) -> Self {
        Self { categories, mask }
    }

    /// Check if two filters allow contact
    pub const fn can_touch(&self, other: &FixtureFilter) -> bool {
        self.categories.intersects(other.mask) && other.categories.intersects(self.mask)
    }

    /// Add categories to membership
    pub fn add_categories(mut self, categories: FixtureCategories) -> Self {
        self.categories |= categories;
        self
    }
}

impl Default for FixtureFilter {
    fn default() -> Self {
        Self::DEFAULT
    }
}
