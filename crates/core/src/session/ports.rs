//! Port interface for session persistence
//!
//! The API client reads the access token through this trait before every
//! request and clears it on a forced logout. It never edits token values;
//! renewed tokens arrive through an explicit `save`.

use async_trait::async_trait;
use courseportal_domain::{Result, Session, UserInfo};

/// Durable storage for the current session
///
/// Implementations must make `save` atomic from a reader's point of view
/// and `clear` idempotent, including when several callers clear at once.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if any
    async fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session
    async fn save(&self, session: Session) -> Result<()>;

    /// Remove tokens and cached user together
    async fn clear(&self) -> Result<()>;

    /// Current access token, if signed in
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.load().await?.map(|session| session.access_token))
    }

    /// Replace only the cached user
    ///
    /// Returns `false` without writing when no session exists.
    async fn update_user(&self, user: UserInfo) -> Result<bool> {
        match self.load().await? {
            Some(mut session) => {
                session.user = Some(user);
                self.save(session).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
