//! # Course Portal Core
//!
//! Session policy and port interfaces - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for session storage and navigation
//! - The session validity state machine
//! - Response-shape routing and the forced-logout policy
//!
//! ## Architecture Principles
//! - Only depends on `courseportal-domain`
//! - No HTTP, file or platform code
//! - All external effects go through traits
//! - Pure, testable policy

pub mod navigation;
pub mod routing;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use navigation::ports::{NavigationReason, NavigationRequest, Navigator};
pub use routing::{ResponseShape, RoutePattern, RouteTable};
pub use session::policy::ForcedLogoutPolicy;
pub use session::ports::SessionStore;
pub use session::state::SessionState;
