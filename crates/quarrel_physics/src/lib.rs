//! Quarrel Physics - the narrow physics interface behaviors consume
//!
//! The rigid-body simulation itself lives in the host. This crate defines
//! what behaviors are allowed to ask of it.
//!
//! # Features
//!
//! - Fixture categories and category/mask filtering
//! - Circular sensor and solid fixture descriptors
//! - Contact begin/end events delivered over a channel
//! - Closest-hit ray casts with category ignore masks
//! - Body position, velocity and angle get/set
//! - A simple vertical gravity model for ground offsets
//!
//! # Example
//!
//! ```ignore
//! use quarrel_physics::prelude::*;
//!
//! let sensor = physics.create_fixture(
//!     entity,
//!     FixtureDesc::sensor(5.0).with_mask(FixtureCategories::PLAYER),
//! )?;
//!
//! let hit = physics.ray_cast(from, to, &RayCastOptions::ignoring(FixtureCategories::SENSOR));
//! ```

pub mod backend;
pub mod body;
pub mod config;
pub mod error;
pub mod events;
pub mod fixture;
pub mod gravity;
pub mod layers;
pub mod query;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::backend::PhysicsBackend;
    pub use crate::body::{BodyState, BodyType};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, ContactPhase, ContactQueue, ContactSide};
    pub use crate::fixture::{FixtureDesc, FixtureHandle, FixtureInfo};
    pub use crate::gravity::GroundMotion;
    pub use crate::layers::{FixtureCategories, FixtureFilter};
    pub use crate::query::{RayCastOptions, RaycastHit};
}

pub use glam::Vec2;
pub use prelude::*;
