//! Tracing setup
//!
//! Installs a global `tracing-subscriber` fmt subscriber. The filter comes
//! from `RUST_LOG` when set, otherwise from [`LoggingConfig::level`].

use courseportal_domain::{LoggingConfig, PortalError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter the subscriber would use
///
/// # Errors
/// Returns `PortalError::Config` if the configured level is not a valid
/// filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| PortalError::Config(format!("Invalid log level '{}': {e}", config.level)))
}

/// Install the global subscriber
///
/// # Errors
/// Returns `PortalError::Config` for an invalid filter, or when a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| PortalError::Config(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::debug!(level = %config.level, json = config.json, "tracing initialised");
    Ok(())
}
