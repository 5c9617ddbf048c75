//! Course portal API client
//!
//! This module provides the authenticated HTTP client and the typed
//! endpoint services built on it.
//!
//! # Architecture
//!
//! - [`ApiClient`] owns transport, bearer attachment, envelope unwrapping
//!   and the forced-logout rule
//! - [`AuthApi`], [`CourseApi`], [`TopicApi`] and [`AdminUserApi`] are thin
//!   wrappers, one method per backend route
//! - Session state lives in an injected store; navigation is delegated to
//!   an injected navigator

pub mod admin;
pub mod auth;
pub mod client;
pub mod courses;
pub mod errors;
mod multipart;
pub mod topics;

pub use admin::AdminUserApi;
pub use auth::AuthApi;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, RequestBody, RequestOptions};
pub use courses::CourseApi;
pub use errors::{ApiError, ApiErrorCategory};
pub use topics::TopicApi;
