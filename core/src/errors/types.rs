//! Error types for token issuance, verification and refresh
//!
//! Each enum covers one failure class so callers can pattern-match the
//! recovery action: refresh on expiry, fail closed on everything else.

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Authentication failures surfaced to request handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or malformed token")]
    InvalidOrMalformedToken,

    #[error("Tampered token")]
    TamperedToken,
}

/// Token decoding and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token type mismatch: expected {expected}, found {actual}")]
    TokenTypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Refresh token expired, re-authentication required")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Tampered refresh token")]
    TamperedRefreshToken,

    #[error("Expiry {expires_at} must be after issue time {issued_at}")]
    InvalidExpiry { issued_at: i64, expires_at: i64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::RequiredField {
            field: field.to_string(),
        }
    }
}

/// Remote token-exchange failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Token service request failed: {message}")]
    Transport { message: String },

    #[error("Token service returned status {status}")]
    Status { status: u16 },

    #[error("Invalid token service response: {message}")]
    InvalidResponse { message: String },
}
