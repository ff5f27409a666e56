//! Animation ids and the library that maps source files to them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Id of an animation registered in an [`AnimationLibrary`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

impl AnimationId {
    /// The "no animation" id
    pub const INVALID: Self = Self(0);

    /// Whether this is a real id
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "AnimationId({})", self.0)
        } else {
            write!(f, "AnimationId(invalid)")
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an animation came from; stable across runs, unlike ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationSourceInfo {
    /// Animation name inside the file
    pub name: String,
    /// Source file
    pub file: String,
}

impl AnimationSourceInfo {
    /// Create source info
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct AnimationEntry {
    source: AnimationSourceInfo,
    duration: f32,
}

/// Registry of loaded animations
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    entries: Vec<AnimationEntry>,
    by_source: HashMap<AnimationSourceInfo, AnimationId>,
}

impl AnimationLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation of `duration` seconds.
    ///
    /// Registering the same source twice returns the existing id.
    pub fn register(&mut self, source: AnimationSourceInfo, duration: f32) -> AnimationId {
        if let Some(&id) = self.by_source.get(&source) {
            return id;
        }
        self.entries.push(AnimationEntry {
            source: source.clone(),
            duration: duration.max(0.0),
        });
        let id = AnimationId(self.entries.len() as u32);
        self.by_source.insert(source, id);
        id
    }

    fn entry(&self, id: AnimationId) -> Option<&AnimationEntry> {
        if !id.is_valid() {
            return None;
        }
        self.entries.get(id.0 as usize - 1)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: AnimationId) -> bool {
        self.entry(id).is_some()
    }

    /// Id for a source, or [`AnimationId::INVALID`]
    pub fn find(&self, source: &AnimationSourceInfo) -> AnimationId {
        self.by_source.get(source).copied().unwrap_or_default()
    }

    /// Source info for an id
    pub fn source_info(&self, id: AnimationId) -> Option<&AnimationSourceInfo> {
        self.entry(id).map(|entry| &entry.source)
    }

    /// Length of one play-through
    pub fn duration(&self, id: AnimationId) -> Option<f32> {
        self.entry(id).map(|entry| entry.duration)
    }

    /// Number of registered animations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut lib = AnimationLibrary::new();
        let shoot = lib.register(AnimationSourceInfo::new("shoot", "enemy.json"), 0.4);
        let stand = lib.register(AnimationSourceInfo::new("stand", "enemy.json"), 1.0);

        assert_ne!(shoot, stand);
        assert!(shoot.is_valid());
        assert_eq!(lib.find(&AnimationSourceInfo::new("stand", "enemy.json")), stand);
        assert_eq!(lib.duration(shoot), Some(0.4));
        assert_eq!(lib.source_info(stand).map(|s| s.name.as_str()), Some("stand"));
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_reuses_id() {
        let mut lib = AnimationLibrary::new();
        let a = lib.register(AnimationSourceInfo::new("die", "enemy.json"), 1.0);
        let b = lib.register(AnimationSourceInfo::new("die", "enemy.json"), 2.0);
        assert_eq!(a, b);
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn test_unknown_lookups() {
        let lib = AnimationLibrary::new();
        assert!(!lib.contains(AnimationId::INVALID));
        assert!(!lib.contains(AnimationId(7)));
        assert_eq!(lib.find(&AnimationSourceInfo::new("x", "y")), AnimationId::INVALID);
    }

    #[test]
    fn test_source_info_json_shape() {
        let json = serde_json::to_value(AnimationSourceInfo::new("run", "melee.json")).unwrap();
        assert_eq!(json["name"], "run");
        assert_eq!(json["file"], "melee.json");
    }
}
