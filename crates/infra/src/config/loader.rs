//! Configuration loader
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `COURSEPORTAL_API_URL` is missing, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `COURSEPORTAL_API_URL`: API base URL (required)
//! - `COURSEPORTAL_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `COURSEPORTAL_LOGIN_PATH`: Application path opened on forced logout
//! - `COURSEPORTAL_SESSION_FILE`: Session file location
//! - `COURSEPORTAL_SESSION_EPHEMERAL`: Keep the session in memory only
//! - `COURSEPORTAL_LOG_LEVEL`: Default tracing filter
//! - `COURSEPORTAL_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./courseportal.json` or `./courseportal.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names one and two directories up
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};

use courseportal_domain::{ApiConfig, Config, LoggingConfig, PortalError, Result, SessionConfig};

use crate::errors::InfraError;

const API_URL_VAR: &str = "COURSEPORTAL_API_URL";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["courseportal.json", "courseportal.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Falls back to a file only when `COURSEPORTAL_API_URL` is unset. Once
/// the URL is given, a malformed environment value is an error.
///
/// # Errors
/// Returns `PortalError::Config` if the environment is invalid or no file
/// yields a valid configuration.
pub fn load() -> Result<Config> {
    if env_opt(API_URL_VAR).is_none() {
        tracing::debug!("{API_URL_VAR} not set, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only the API URL is required; every other setting falls back to its
/// default.
///
/// # Errors
/// Returns `PortalError::Config` if the URL is missing or a value cannot
/// be parsed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(API_URL_VAR)?;

    let mut api = ApiConfig { base_url, ..ApiConfig::default() };
    if let Some(timeout) = env_opt("COURSEPORTAL_API_TIMEOUT_SECS") {
        api.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| PortalError::Config(format!("Invalid API timeout: {e}")))?;
    }
    if let Some(login_path) = env_opt("COURSEPORTAL_LOGIN_PATH") {
        api.login_path = login_path;
    }

    let mut session = SessionConfig::default();
    if let Some(file) = env_opt("COURSEPORTAL_SESSION_FILE") {
        session.file = file;
    }
    session.ephemeral = env_bool("COURSEPORTAL_SESSION_EPHEMERAL", false);

    let mut logging = LoggingConfig::default();
    if let Some(level) = env_opt("COURSEPORTAL_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = env_bool("COURSEPORTAL_LOG_JSON", false);

    let config = Config { api, session, logging };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `PortalError::Config` if the file is missing or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PortalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PortalError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PortalError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PortalError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PortalError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        PortalError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank counts as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
