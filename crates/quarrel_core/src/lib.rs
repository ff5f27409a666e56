//! # quarrel_core - Quarrel Core Primitives
//!
//! Zero-dependency building blocks shared by every Quarrel crate:
//! - **Entities**: generational handles and the allocator that issues them
//! - **Weak references**: self-clearing handles to entities owned elsewhere
//! - **Interpolation**: fixed-duration value transitions for cameras and UI
//! - **Versioning**: the format version stamped on persisted documents

pub mod entity;
pub mod entity_ref;
pub mod lerp;
pub mod version;

pub use entity::*;
pub use entity_ref::*;
pub use lerp::*;
pub use version::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::entity::{Entity, EntityAllocator, EntityLookup};
    pub use crate::entity_ref::WeakEntityRef;
    pub use crate::lerp::{lerp, no_ease, Lerp, TimeLerper};
    pub use crate::version::DocumentVersion;
}
