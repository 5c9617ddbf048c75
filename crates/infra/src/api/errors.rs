//! API-specific error types
//!
//! Every failed call resolves to one [`ApiError`]. Transport failures (no
//! response) are kept apart from failures the server reported, and a
//! rejected credential has its own variant because the client has already
//! cleared the session when it is returned.

use std::time::Duration;

use courseportal_domain::PortalError;
use thiserror::Error;

/// Broad classes of API errors, for UI messaging and caller-side retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Credential rejected (401, 403); the session is gone
    Authentication,
    /// The server answered with a failure envelope or non-2xx status
    ServerReported,
    /// No response: connection failure or timeout
    Network,
    /// Local failures: validation, decoding, session storage
    Client,
    /// Misconfigured client
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },

    #[error("Session expired ({status_code}): {message}")]
    AuthExpired { status_code: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Status code reported by the server, if a response was received
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status_code, .. } | Self::AuthExpired { status_code, .. } => {
                Some(*status_code)
            }
            _ => None,
        }
    }

    /// Human-readable message
    ///
    /// Server-reported failures return the server's message verbatim.
    pub fn message(&self) -> String {
        match self {
            Self::Server { message, .. } | Self::AuthExpired { message, .. } => message.clone(),
            Self::Network(message)
            | Self::Validation(message)
            | Self::Decode(message)
            | Self::Storage(message)
            | Self::Config(message) => message.clone(),
            Self::Timeout(after) => format!("request timed out after {after:?}"),
        }
    }

    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::AuthExpired { .. } => ApiErrorCategory::Authentication,
            Self::Server { .. } => ApiErrorCategory::ServerReported,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Validation(_) | Self::Decode(_) | Self::Storage(_) => ApiErrorCategory::Client,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether repeating the same call could succeed
    ///
    /// The client never retries on its own; this is a hint for callers
    /// that do.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Server { status_code, .. } => matches!(*status_code, 429 | 502..=504),
            _ => false,
        }
    }

    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Config(msg) => Self::Config(msg),
            PortalError::Storage(msg) => Self::Storage(msg),
            PortalError::InvalidInput(msg) => Self::Validation(msg),
            PortalError::Serialization(msg) => Self::Decode(msg),
        }
    }
}
