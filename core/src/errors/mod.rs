//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, ExchangeError, TokenError, ValidationError};

use thiserror::Error;
use tl_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP status a request handler should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Internal { .. } => 500,
            DomainError::Auth(_) | DomainError::Token(_) => 401,
            DomainError::Validation(ValidationError::InvalidConfiguration { .. }) => 500,
            DomainError::Validation(_) => 422,
            DomainError::Exchange(_) => 502,
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(AuthError::TamperedToken) => error_codes::TOKEN_TAMPERED,
            DomainError::Auth(AuthError::InvalidOrMalformedToken) => error_codes::UNAUTHORIZED,
            DomainError::Token(err) => match err {
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                TokenError::RefreshTokenExpired => error_codes::REFRESH_TOKEN_EXPIRED,
                TokenError::InvalidTokenFormat => error_codes::TOKEN_MALFORMED,
                _ => error_codes::TOKEN_INVALID,
            },
            DomainError::Validation(ValidationError::TamperedRefreshToken) => {
                error_codes::TOKEN_TAMPERED
            }
            DomainError::Validation(_) => error_codes::VALIDATION_ERROR,
            DomainError::Exchange(_) => error_codes::TOKEN_SERVICE_ERROR,
        }
    }

    /// Whether the access token should be refreshed in response to this error
    pub fn is_access_token_expiry(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::TokenExpired))
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string(), self.status_code());
        match self {
            DomainError::Validation(ValidationError::RequiredField { field }) => {
                response.with_detail("field", field)
            }
            DomainError::Token(TokenError::MissingClaim { claim }) => {
                response.with_detail("claim", claim)
            }
            DomainError::Exchange(ExchangeError::Status { status }) => {
                response.with_detail("upstream_status", status)
            }
            _ => response,
        }
    }
}
