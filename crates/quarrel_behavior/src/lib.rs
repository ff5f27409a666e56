//! Quarrel Behavior - Per-Entity Game Logic
//!
//! Behaviors are stateful objects bound one-to-one to entities. The host
//! drives them with contact edges, input and fixed steps; they answer with
//! [`BehaviorCommand`]s the host applies once each call has returned.
//!
//! # Features
//!
//! - `Behavior` contract with command results instead of self-destruction
//! - Closed `BehaviorKind` tags plus a registry for custom kinds
//! - Player with movement, sticky look, debug damage keys and a crossbow
//! - Dead player taking over the camera and lowering it to the floor
//! - Ranged enemy driven by a state machine (dormant, awakening, aggro, dying)
//! - Melee enemy pursuing its target and burning in fire
//! - Enemy projectiles and crossbow bolts with payloads
//! - Camera registry with scoped leases and main-camera hand-over
//! - Versioned JSON persistence of tunable fields
//!
//! # Example
//!
//! ```ignore
//! use quarrel_behavior::prelude::*;
//!
//! let config = BehaviorConfig::load("quarrel.json")?;
//! let player = Player::new(&mut ctx, &config);
//!
//! match player.on_step(&mut ctx, dt) {
//!     BehaviorCommand::ReplaceWith(next) => slot.replace(next),
//!     _ => {}
//! }
//! ```

pub mod audio;
pub mod behavior;
pub mod camera;
pub mod config;
pub mod context;
pub mod dead_player;
pub mod enemy;
pub mod enemy_melee;
pub mod error;
pub mod input;
pub mod kind;
pub mod persist;
pub mod player;
pub mod projectile;
pub mod render;
pub mod weapon;

pub mod prelude {
    pub use crate::audio::{play_clip, AudioBackend};
    pub use crate::behavior::{Behavior, BehaviorCommand, Contact};
    pub use crate::camera::{Camera3D, CameraId, CameraLease, CameraRegistry};
    pub use crate::config::{BehaviorConfig, CrossbowConfig, EnemyConfig, MeleeConfig, PlayerConfig};
    pub use crate::context::BehaviorContext;
    pub use crate::dead_player::DeadPlayer;
    pub use crate::enemy::{Enemy, EnemyAnimations, EnemySenses, EnemyState};
    pub use crate::enemy_melee::EnemyMelee;
    pub use crate::error::{ConfigError, PersistError};
    pub use crate::input::{InputState, Key};
    pub use crate::kind::{BehaviorKind, KindId, KindRegistry};
    pub use crate::persist::{load_document, save_document};
    pub use crate::player::{Player, PlayerHud};
    pub use crate::projectile::{CrossbowBolt, EnemyProjectile, ProjectileDesc, ProjectileKind};
    pub use crate::render::RenderBinding;
    pub use crate::weapon::Crossbow;
}

pub use prelude::*;
