//! Behavior error types

use thiserror::Error;

/// Errors loading a [`BehaviorConfig`](crate::config::BehaviorConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Not valid JSON, or a field has the wrong type
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reading persisted behavior documents
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Written by a newer build
    #[error("Unsupported document version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    /// Document is for a different behavior kind
    #[error("Document is for '{found}', expected '{expected}'")]
    KindMismatch { expected: String, found: String },
    /// Kind name not in the registry
    #[error("Unknown behavior kind '{0}'")]
    UnknownKind(String),
    /// Document is not an object, or misses its envelope fields
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Result alias for persistence
pub type Result<T> = std::result::Result<T, PersistError>;
