//! Error types for the core library

use thiserror::Error;

/// Core error type for environment operations
#[derive(Error, Debug)]
pub enum GymError {
    /// Simulator identifier unresolvable or seeding failed at construction
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Fault raised by the underlying simulator during reset/step/render
    #[error("Simulator error: {0}")]
    Simulator(String),

    /// Operation not supported by the backing simulator
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for environment operations
pub type Result<T> = std::result::Result<T, GymError>;
