//! In-memory session store
//!
//! For tests and short-lived tools that should not leave tokens on disk.
//! The session is gone when the process exits.

use async_trait::async_trait;
use courseportal_core::SessionStore;
use courseportal_domain::{Result, Session};
use parking_lot::RwLock;

/// Session held in process memory only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { inner: RwLock::new(Some(session)) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.inner.read().clone())
    }

    async fn save(&self, session: Session) -> Result<()> {
        *self.inner.write() = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.inner.write().take();
        Ok(())
    }
}
