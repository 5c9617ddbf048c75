//! Configuration structures
//!
//! Every field has a serde default so partial JSON/TOML files load.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_LOGIN_PATH, DEFAULT_LOG_LEVEL, DEFAULT_SESSION_FILE,
    DEFAULT_TIMEOUT_SECS, LOGIN_ENDPOINT,
};
use crate::errors::{PortalError, Result};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject settings the client cannot start with
    ///
    /// # Errors
    /// Returns `PortalError::Config` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PortalError::Config(format!(
                "api.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(PortalError::Config("api.timeout_secs must be greater than 0".into()));
        }
        if !self.api.login_path.starts_with('/') {
            return Err(PortalError::Config("api.login_path must start with '/'".into()));
        }
        if self.api.success_status_codes.is_empty() {
            return Err(PortalError::Config("api.success_status_codes must not be empty".into()));
        }
        if !self.session.ephemeral && self.session.file.trim().is_empty() {
            return Err(PortalError::Config("session.file is required unless ephemeral".into()));
        }
        Ok(())
    }
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Application path the shell navigates to on forced logout
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Endpoints whose 401/403 responses do not force a logout
    #[serde(default = "default_auth_exempt_paths")]
    pub auth_exempt_paths: Vec<String>,

    /// Envelope `statusCode` values that count as success
    #[serde(default = "default_success_status_codes")]
    pub success_status_codes: Vec<u16>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            login_path: default_login_path(),
            auth_exempt_paths: default_auth_exempt_paths(),
            success_status_codes: default_success_status_codes(),
            user_agent: None,
        }
    }
}

/// Where the session is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON session file
    #[serde(default = "default_session_file")]
    pub file: String,

    /// Keep the session in memory only
    #[serde(default)]
    pub ephemeral: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { file: default_session_file(), ephemeral: false }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_auth_exempt_paths() -> Vec<String> {
    vec![LOGIN_ENDPOINT.to_string()]
}

fn default_success_status_codes() -> Vec<u16> {
    vec![200]
}

fn default_session_file() -> String {
    DEFAULT_SESSION_FILE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.success_status_codes, vec![200]);
        assert_eq!(config.api.auth_exempt_paths, vec!["/auth/login".to_string()]);
    }

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:8080".into();
        assert!(
            matches!(config.validate(), Err(PortalError::Config(msg)) if msg.contains("base_url"))
        );

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.login_path = "login".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api": {"base_url": "https://courses.example/api"}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://courses.example/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.login_path, "/login");
        assert!(!config.session.ephemeral);
    }
}
