//! Shared test helpers for `courseportal-core` integration tests.
//!
//! In-memory implementations of the session and navigation ports, so the
//! policy can be exercised end to end without HTTP or a filesystem.

use async_trait::async_trait;
use courseportal_core::{NavigationRequest, Navigator, SessionStore};
use courseportal_domain::{Result as DomainResult, Session};
use parking_lot::Mutex;

/// Session store backed by a mutex; counts clears
#[derive(Default)]
pub struct MockSessionStore {
    session: Mutex<Option<Session>>,
    clears: Mutex<usize>,
}

impl MockSessionStore {
    pub fn with_session(session: Session) -> Self {
        Self { session: Mutex::new(Some(session)), clears: Mutex::new(0) }
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn load(&self) -> DomainResult<Option<Session>> {
        Ok(self.session.lock().clone())
    }

    async fn save(&self, session: Session) -> DomainResult<()> {
        *self.session.lock() = Some(session);
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        *self.session.lock() = None;
        *self.clears.lock() += 1;
        Ok(())
    }
}

/// Navigator that records every request
#[derive(Default)]
pub struct RecordingNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.lock().push(request);
    }
}
