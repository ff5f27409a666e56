//! Quarrel Anim - Animation Chains
//!
//! Behaviors script multi-phase actions (awake, shoot, stand) as an
//! [`AnimationChain`]: the first step replaces current playback, the rest are
//! queued to play as each predecessor finishes.
//!
//! # Example
//!
//! ```ignore
//! use quarrel_anim::prelude::*;
//!
//! AnimationChain::new(shoot, RepeatPolicy::Never)
//!     .then(stand, RepeatPolicy::Forever)
//!     .apply(&mut animator);
//! ```

pub mod animator;
pub mod chain;
pub mod error;
pub mod library;

pub mod prelude {
    pub use crate::animator::{Animator, QueuedAnimator, RepeatPolicy};
    pub use crate::chain::{AnimationChain, AnimationStep, ChainReport};
    pub use crate::error::{AnimationError, Result};
    pub use crate::library::{AnimationId, AnimationLibrary, AnimationSourceInfo};
}

pub use prelude::*;
