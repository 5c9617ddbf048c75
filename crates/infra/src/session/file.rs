//! File-backed session store
//!
//! The whole session lives in one JSON object. Saves write a sibling
//! `.tmp` file and rename it over the target, so a reader sees either the
//! old session or the new one.

use std::ffi::OsString;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use courseportal_core::SessionStore;
use courseportal_domain::{PortalError, Result, Session};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::InfraError;

pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name =
            self.path.file_name().map_or_else(|| OsString::from("session"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl std::fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSessionStore").field("path", &self.path).finish_non_exhaustive()
    }
}

fn storage(err: IoError) -> PortalError {
    InfraError::from(err).into()
}

/// Write `bytes` to a freshly created file readable only by the owner
///
/// A leftover file at `path` is removed first so the owner-only mode is
/// applied at creation, before any token byte is written.
async fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(storage(err)),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.map_err(storage)?;
    file.write_all(bytes).await.map_err(storage)?;
    file.sync_all().await.map_err(storage)
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage(err)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            PortalError::Storage(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, session: Session) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let json = serde_json::to_vec_pretty(&session)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage)?;
        }

        let temp = self.temp_path();
        write_private(&temp, &json).await?;
        fs::rename(&temp, &self.path).await.map_err(storage)?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage(err)),
        }
    }
}
