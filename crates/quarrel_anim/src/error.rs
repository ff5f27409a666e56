//! Animation errors

use crate::library::AnimationId;
use thiserror::Error;

/// Animation collaborator errors. All of them are soft: callers log and move on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The invalid id was passed
    #[error("Invalid animation id")]
    InvalidId,

    /// The library has no such animation
    #[error("Unknown animation: {0}")]
    Unknown(AnimationId),

    /// No room for another queued animation
    #[error("Animation queue full (capacity {0})")]
    QueueFull(usize),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
