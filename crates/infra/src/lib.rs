//! # Course Portal Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - HTTP transport (reqwest) and the authenticated [`ApiClient`]
//! - Typed endpoint services for auth, courses, topics and admin users
//! - Session store implementations (memory, JSON file)
//! - Navigator implementations (channel, logging)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `courseportal-core`
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod navigation;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{
    AdminUserApi, ApiClient, ApiClientBuilder, ApiClientConfig, ApiError, ApiErrorCategory,
    AuthApi, CourseApi, RequestBody, RequestOptions, TopicApi,
};
pub use http::{HttpClient, HttpClientBuilder};
pub use navigation::{ChannelNavigator, LoggingNavigator};
pub use session::{open_session_store, FileSessionStore, MemorySessionStore};
