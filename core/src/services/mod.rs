//! Business services containing the token lifecycle logic.

pub mod token;

// Re-export commonly used types
pub use token::{
    Clock, ManualClock, RefreshTokenRequest, SystemClock, TokenCodec, TokenExchangeClient,
    TokenExchangeResponse, TokenManager, TokenManagerConfig, REQUIRED_CLAIMS,
};
