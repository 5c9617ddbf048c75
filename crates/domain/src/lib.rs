//! # Course Portal Domain
//!
//! Data types shared by every layer of the course portal client.
//!
//! This crate contains:
//! - Session, token and user types
//! - The backend response envelope
//! - Course, topic and enrollment DTOs
//! - Configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other course portal crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
