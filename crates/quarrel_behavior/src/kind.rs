//! Behavior kind tags and the registry mapping them to stable names

use std::collections::HashMap;
use std::fmt;

/// Id of a kind registered at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(pub u32);

/// What a behavior is, as seen by its peers.
///
/// Peers compare kinds instead of names: "did I just touch an enemy
/// projectile?" is `kind.is_enemy_projectile()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Player,
    DeadPlayer,
    Enemy,
    EnemyMelee,
    EnemyProjectile,
    CrossbowBolt,
    /// Registered through [`KindRegistry::register`]
    Custom(KindId),
}

impl BehaviorKind {
    /// Every built-in kind
    pub const BUILTIN: [BehaviorKind; 6] = [
        Self::Player,
        Self::DeadPlayer,
        Self::Enemy,
        Self::EnemyMelee,
        Self::EnemyProjectile,
        Self::CrossbowBolt,
    ];

    /// Stable name of a built-in kind
    pub fn builtin_name(self) -> Option<&'static str> {
        match self {
            Self::Player => Some("Player"),
            Self::DeadPlayer => Some("DeadPlayer"),
            Self::Enemy => Some("Enemy"),
            Self::EnemyMelee => Some("EnemyMelee"),
            Self::EnemyProjectile => Some("EnemyProjectile"),
            Self::CrossbowBolt => Some("CrossbowBolt"),
            Self::Custom(_) => None,
        }
    }

    /// Projectiles fired by the player
    pub fn is_player_projectile(self) -> bool {
        self == Self::CrossbowBolt
    }

    /// Projectiles fired by enemies
    pub fn is_enemy_projectile(self) -> bool {
        self == Self::EnemyProjectile
    }

    pub fn is_enemy(self) -> bool {
        matches!(self, Self::Enemy | Self::EnemyMelee)
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Name <-> kind table, pre-filled with the built-in kinds
#[derive(Debug, Clone)]
pub struct KindRegistry {
    by_name: HashMap<String, BehaviorKind>,
    names: HashMap<BehaviorKind, String>,
    next_custom: u32,
}

impl KindRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::new(),
            names: HashMap::new(),
            next_custom: 0,
        };
        for kind in BehaviorKind::BUILTIN {
            if let Some(name) = kind.builtin_name() {
                registry.insert(name.to_string(), kind);
            }
        }
        registry
    }

    fn insert(&mut self, name: String, kind: BehaviorKind) {
        self.names.insert(kind, name.clone());
        self.by_name.insert(name, kind);
    }

    /// Register a new kind under `name`.
    ///
    /// A name that is already taken returns the existing kind.
    pub fn register(&mut self, name: &str) -> BehaviorKind {
        if let Some(kind) = self.by_name.get(name) {
            return *kind;
        }
        let kind = BehaviorKind::Custom(KindId(self.next_custom));
        self.next_custom += 1;
        log::debug!("KindRegistry::register: {} -> {:?}", name, kind);
        self.insert(name.to_string(), kind);
        kind
    }

    pub fn lookup(&self, name: &str) -> Option<BehaviorKind> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, kind: BehaviorKind) -> Option<&str> {
        self.names.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
