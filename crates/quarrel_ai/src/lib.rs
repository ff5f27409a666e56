//! Quarrel AI - enemy decision making
//!
//! # Features
//!
//! - Finite state machines with ordered and global transitions
//! - Line-of-sight checks toward the player
//! - "Enemy ahead" checks used for sticky aiming
//!
//! # Example
//!
//! ```ignore
//! use quarrel_ai::prelude::*;
//!
//! let mut fsm = StateMachine::new(EnemyState::Dormant);
//! fsm.add_transition(EnemyState::Dormant, EnemyState::Awakening, |s: &Senses| s.player_visible);
//! fsm.add_global_transition(EnemyState::Dying, |s: &Senses| s.damage_exceeded);
//!
//! if let Some(change) = fsm.update(&senses) {
//!     // react to change.to
//! }
//! ```

pub mod sight;
pub mod state_machine;

pub mod prelude {
    pub use crate::sight::{enemy_ahead, find_player, AHEAD_IGNORE, SIGHT_IGNORE};
    pub use crate::state_machine::{State, StateChange, StateMachine, Transition};
}

pub use prelude::*;
