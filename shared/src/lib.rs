//! Shared utilities and common types for the token lifecycle services
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Error response envelope and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
