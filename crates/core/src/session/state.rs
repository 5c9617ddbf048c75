//! Session validity as observed by the API client
//!
//! ```text
//! Anonymous --login + save--> Authenticated
//! Authenticated --401/403--> Anonymous (forced, navigates to login)
//! Authenticated --logout--> Anonymous
//! ```
//!
//! There is no refreshing state: a refresh is an explicit call made before
//! the client is used, never a transition taken mid-request.

use courseportal_domain::Session;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl From<Option<&Session>> for SessionState {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(session) if !session.access_token.is_empty() => Self::Authenticated,
            _ => Self::Anonymous,
        }
    }
}
