//! Error types for the cache shell
//!
//! Provides unified error handling using thiserror. The cache engine itself
//! never fails; these errors come from configuration, command parsing and
//! session I/O.

use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Malformed command arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Command name not recognised
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Unusable configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Reading commands or writing responses failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a response failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Whether the session can report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CacheError::NotFound(_) | CacheError::InvalidRequest(_) | CacheError::UnknownCommand(_)
        )
    }
}

// == Response Conversion ==
impl From<&CacheError> for ErrorResponse {
    fn from(error: &CacheError) -> Self {
        ErrorResponse::new(error.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
