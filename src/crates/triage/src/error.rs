//! Error types for Triage
//!
//! Provides a unified error type for all Triage operations.
//!
//! Routing itself never fails for well-typed input: a prompt that
//! matches nothing is the clarification outcome, not an error, and a
//! malformed activation pattern is scoped to the entry that carries it.
//! Errors here come from the edges of the system — loading the
//! manifest, reading configuration, and the generation/validation
//! collaborators touching the filesystem.

use thiserror::Error;

/// Result type alias for Triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Errors that can occur in Triage operations
#[derive(Error, Debug)]
pub enum TriageError {
    /// Manifest integrity or structure violation (e.g. duplicate entry names)
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation collaborator error
    #[error("Generation error: {0}")]
    Generate(String),

    /// Validation collaborator error
    #[error("Validation error: {0}")]
    Validate(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<String> for TriageError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

impl From<&str> for TriageError {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}
