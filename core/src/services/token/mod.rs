//! Token service module for JWT lifecycle management
//!
//! This module handles all token-related operations including:
//! - Signing and verifying JWT claim sets
//! - Issuing access/refresh token pairs per subject
//! - Expiry detection against an injectable clock
//! - Local or remote refresh of expired access tokens

mod clock;
mod codec;
mod config;
mod exchange;
mod locks;
mod manager;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{TokenCodec, REQUIRED_CLAIMS};
pub use config::TokenManagerConfig;
pub use exchange::{RefreshTokenRequest, TokenExchangeClient, TokenExchangeResponse};
pub use manager::TokenManager;
