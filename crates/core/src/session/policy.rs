//! Forced-logout policy
//!
//! A 401 or 403 means the credential is invalid or expired. The client then
//! clears the session and sends the shell to the login view, unless the call
//! itself was the login (a wrong password must surface as an ordinary
//! error).

use crate::routing::RoutePattern;

#[derive(Debug, Clone)]
pub struct ForcedLogoutPolicy {
    exempt: Vec<RoutePattern>,
}

impl ForcedLogoutPolicy {
    pub fn new<I, S>(exempt_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { exempt: exempt_paths.into_iter().map(|p| RoutePattern::parse(p.as_ref())).collect() }
    }

    pub const fn is_auth_status(status: u16) -> bool {
        matches!(status, 401 | 403)
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt.iter().any(|pattern| pattern.matches(path))
    }

    /// Decide whether a response forces a logout
    ///
    /// Either the transport status or the envelope's own `statusCode` may
    /// carry the 401/403.
    pub fn forces_logout(&self, path: &str, http_status: u16, envelope_status: Option<u16>) -> bool {
        let auth_failure =
            Self::is_auth_status(http_status) || envelope_status.is_some_and(Self::is_auth_status);
        auth_failure && !self.is_exempt(path)
    }
}
