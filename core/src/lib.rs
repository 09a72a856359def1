//! # Token Lifecycle Core
//!
//! Core logic for issuing, verifying and refreshing signed access/refresh
//! token pairs. This crate contains the token domain model, error types,
//! the token store interface and the services built on top of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{IssuedTokenPair, TokenPayload, TokenType};
pub use errors::{AuthError, DomainError, DomainResult, ExchangeError, TokenError, ValidationError};
pub use repositories::{InMemoryTokenStore, TokenStore};
pub use services::{
    Clock, ManualClock, SystemClock, TokenCodec, TokenExchangeClient, TokenManager,
    TokenManagerConfig,
};
