//! Error types used outside the HTTP client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the course portal domain
///
/// Raised by configuration loading, session persistence and local input
/// validation. The HTTP layer has its own richer error type that these
/// convert into.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, PortalError>;
