//! # Infrastructure Layer
//!
//! Concrete implementations behind the token lifecycle core:
//! - **HTTP**: reqwest client for a remote OAuth2 token endpoint
//! - **Telemetry**: tracing subscriber setup from the logging config
//! - **Bootstrap**: configuration loading and token manager wiring

// Re-export core types for convenience
pub use tl_core::errors::*;

/// HTTP clients for external services
pub mod http;

/// Configuration loading and service wiring
pub mod bootstrap;

/// Tracing subscriber initialisation
pub mod telemetry;

pub use bootstrap::{build_token_manager, load_config};
pub use http::{HttpTokenExchangeClient, HttpTokenExchangeConfig};
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the token lifecycle core
    #[error(transparent)]
    Domain(#[from] DomainError),
}
