//! Domain entities representing signed tokens and issued token pairs.

pub mod token;

// Re-export commonly used types
pub use token::{
    IssuedTokenPair, TokenPayload, TokenType,
    DEFAULT_ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS, TOKEN_ISSUER,
};
