//! Feature flag error types.

use thiserror::Error;

/// Result type for flag lookups and service construction.
pub type Result<T> = std::result::Result<T, FeatureFlagError>;

/// Failures surfaced to callers of the flag service.
///
/// Evaluation problems reported by the client never appear here; they are
/// absorbed into the caller's default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureFlagError {
    /// A required argument was empty or missing.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The service cannot serve lookups in its current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Failures while constructing an evaluation client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No client implementation is available in this build.
    #[error("Evaluation client unavailable: {0}")]
    Unavailable(String),

    /// The client rejected its configuration.
    #[error("Failed to build evaluation client: {0}")]
    Build(String),

    /// The client could not be started in the current environment.
    #[error("Failed to start evaluation client: {0}")]
    Runtime(String),
}
