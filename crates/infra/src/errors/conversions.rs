//! Conversions from external infrastructure errors into domain and API errors.

use std::io::{Error as IoError, ErrorKind};
use std::time::Duration;

use courseportal_domain::PortalError;
use reqwest::Error as HttpError;
use toml::de::Error as TomlError;

use crate::api::ApiError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PortalError);

impl From<InfraError> for PortalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PortalError> for InfraError {
    fn from(value: PortalError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPortalError {
    fn into_portal(self) -> PortalError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → PortalError */
/* -------------------------------------------------------------------------- */

impl IntoPortalError for IoError {
    fn into_portal(self) -> PortalError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                PortalError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => PortalError::Storage(format!("file not found: {self}")),
            _ => PortalError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_portal())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → PortalError */
/* -------------------------------------------------------------------------- */

impl IntoPortalError for TomlError {
    fn into_portal(self) -> PortalError {
        PortalError::Config(format!("invalid TOML: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(value.into_portal())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

/// Map a transport failure, i.e. one where no usable response arrived.
///
/// `timeout` is the configured request timeout; reqwest does not report it.
pub(crate) fn transport_error(err: &HttpError, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(timeout);
    }

    if err.is_builder() {
        return ApiError::Config(format!("invalid request: {err}"));
    }

    if err.is_decode() {
        return ApiError::Decode(format!("failed to read response body: {err}"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return ApiError::Network(format!("HTTP connection failure: {err}"));
    }

    ApiError::Network(format!("HTTP request failed: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
