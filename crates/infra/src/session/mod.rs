//! Session store implementations
//!
//! - [`MemorySessionStore`]: process-local, for tests and one-shot tools
//! - [`FileSessionStore`]: durable JSON file with the fixed
//!   `accessToken`/`refreshToken`/`userInfo` keys

mod file;
mod memory;

use std::sync::Arc;

use courseportal_core::SessionStore;
use courseportal_domain::SessionConfig;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
use tracing::debug;

/// Pick the store described by the session configuration
pub fn open_session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    if config.ephemeral {
        debug!("using in-memory session store");
        Arc::new(MemorySessionStore::new())
    } else {
        debug!(path = %config.file, "using file session store");
        Arc::new(FileSessionStore::new(&config.file))
    }
}
