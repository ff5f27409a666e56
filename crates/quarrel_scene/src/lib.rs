//! Quarrel Scene - an in-memory host for behaviors
//!
//! Owns everything a behavior borrows during a call and drives the fixed
//! step. Good enough to run a small arena headless and to test behaviors
//! end to end.
//!
//! # Features
//!
//! - Generational entity arena
//! - Circle physics with filtered begin/end contact edges and ray casts
//! - Per-entity queued animators and render bindings
//! - Recording audio backend
//! - Behavior slots applying returned commands after each call
//! - Deferred destruction and spawn queues
//!
//! # Example
//!
//! ```ignore
//! use quarrel_scene::prelude::*;
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! let player = scene.spawn_player(Vec2::ZERO);
//! scene.spawn_enemy(Vec2::new(4.0, 0.0));
//!
//! for _ in 0..600 {
//!     scene.tick(&InputState::new(), 1.0 / 60.0);
//! }
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod physics;
pub mod scene;

pub mod prelude {
    pub use crate::audio::{PlayedClip, RecordingAudio};
    pub use crate::config::{AnimationAsset, EnemySprites, SceneConfig};
    pub use crate::error::{Result, SceneError};
    pub use crate::physics::SimplePhysics;
    pub use crate::scene::Scene;
    pub use glam::Vec2;
    pub use quarrel_behavior::{BehaviorKind, InputState};
}

pub use prelude::*;
