//! Port interface for application navigation
//!
//! The API client never decides what "go to login" means. It raises a
//! [`NavigationRequest`] and the shell that owns the UI acts on it.

use serde::{Deserialize, Serialize};

/// Why the client asked for a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationReason {
    /// The server rejected the credential (401/403)
    SessionExpired,
    /// The user signed out explicitly
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// Application path to open, e.g. `/login`; never carries a return path
    pub path: String,
    pub reason: NavigationReason,
}

impl NavigationRequest {
    pub fn session_expired(login_path: impl Into<String>) -> Self {
        Self { path: login_path.into(), reason: NavigationReason::SessionExpired }
    }

    pub fn logged_out(login_path: impl Into<String>) -> Self {
        Self { path: login_path.into(), reason: NavigationReason::LoggedOut }
    }
}

/// Receives navigation requests from the client
///
/// Called from inside request handling, so implementations must not block.
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}
