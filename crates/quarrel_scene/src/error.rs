//! Scene error types

use quarrel_behavior::{ConfigError, PersistError};
use quarrel_core::Entity;
use thiserror::Error;

/// Errors from scene operations
#[derive(Debug, Error)]
pub enum SceneError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Entity is not alive
    #[error("Entity not found: {0}")]
    EntityNotFound(Entity),

    /// Entity has no behavior attached
    #[error("Entity {0} has no behavior")]
    NoBehavior(Entity),

    /// Persisted document was rejected
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
