//! Error types for the physics interface

use crate::fixture::FixtureHandle;
use quarrel_core::Entity;
use thiserror::Error;

/// Physics collaborator errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// Entity has no body
    #[error("Entity has no physics body: {0}")]
    BodyNotFound(Entity),

    /// Fixture not found
    #[error("Fixture not found: {0:?}")]
    FixtureNotFound(FixtureHandle),

    /// Shape creation failed
    #[error("Failed to create fixture shape: {0}")]
    InvalidShape(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
