//! Quarrel Combat - Damage and Status Effects
//!
//! # Features
//!
//! - Bounded damage accumulator with a "limit exceeded" predicate
//! - Status effect registry (Burning, ...) with per-kind duration and tick rule
//! - Effect sets unique by kind; adding an active kind refreshes it
//! - Hazard contact tracking driven by begin/end contact
//! - Per-pair contact dedup so a repeated begin deals no extra damage
//! - The shared per-tick status pipeline used by every damageable behavior
//! - Quivers of quarrel slots with individual cooldowns
//!
//! # Example
//!
//! ```ignore
//! use quarrel_combat::prelude::*;
//!
//! let mut damage = DamageCount::new(30);
//! let mut status = CombatStatus::new(EffectRegistry::default());
//!
//! status.on_begin_contact(&fire_fixture);
//! status.tick(dt, &mut damage, &mut render);
//!
//! if damage.exceeded() {
//!     // replace the behavior
//! }
//! ```

pub mod bolt;
pub mod colour;
pub mod contacts;
pub mod damage;
pub mod effect;
pub mod hazard;
pub mod quiver;
pub mod status;

pub mod prelude {
    pub use crate::bolt::BoltPayload;
    pub use crate::colour::Colour;
    pub use crate::contacts::ContactPairs;
    pub use crate::damage::{DamageCount, DamageSink};
    pub use crate::effect::{ActiveEffect, ActiveEffectSet, ActiveEffectType, EffectRegistry, EffectSpec};
    pub use crate::hazard::HazardContacts;
    pub use crate::quiver::{PlayerQuiver, QuarrelSlot, QuarrelTypeInfo};
    pub use crate::status::{CombatStatus, EffectVisual, StatusTick};
}

pub use prelude::*;
