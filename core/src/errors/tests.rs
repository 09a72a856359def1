use tl_shared::errors::IntoErrorResponse;

use super::*;
use crate::domain::entities::token::TokenType;

#[test]
fn test_status_codes() {
    assert_eq!(DomainError::from(AuthError::TamperedToken).status_code(), 401);
    assert_eq!(DomainError::from(TokenError::TokenExpired).status_code(), 401);
    assert_eq!(
        DomainError::from(ValidationError::TamperedRefreshToken).status_code(),
        422
    );
    assert_eq!(
        DomainError::from(ExchangeError::Status { status: 503 }).status_code(),
        502
    );
    assert_eq!(
        DomainError::Internal {
            message: "boom".to_string()
        }
        .status_code(),
        500
    );
}

#[test]
fn test_error_codes_distinguish_expiry_kinds() {
    assert_eq!(
        DomainError::from(TokenError::TokenExpired).error_code(),
        "TOKEN_EXPIRED"
    );
    assert_eq!(
        DomainError::from(TokenError::RefreshTokenExpired).error_code(),
        "REFRESH_TOKEN_EXPIRED"
    );
    assert_eq!(
        DomainError::from(TokenError::InvalidSignature).error_code(),
        "TOKEN_INVALID"
    );
    assert_eq!(
        DomainError::from(TokenError::InvalidTokenFormat).error_code(),
        "TOKEN_MALFORMED"
    );
}

#[test]
fn test_messages() {
    assert_eq!(
        AuthError::InvalidOrMalformedToken.to_string(),
        "Invalid or malformed token"
    );
    assert_eq!(AuthError::TamperedToken.to_string(), "Tampered token");
    assert_eq!(
        ValidationError::TamperedRefreshToken.to_string(),
        "Tampered refresh token"
    );

    let mismatch = TokenError::TokenTypeMismatch {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
    };
    assert_eq!(
        mismatch.to_string(),
        "Token type mismatch: expected refresh, found access"
    );
}

#[test]
fn test_only_access_expiry_triggers_refresh() {
    assert!(DomainError::from(TokenError::TokenExpired).is_access_token_expiry());
    assert!(!DomainError::from(TokenError::RefreshTokenExpired).is_access_token_expiry());
    assert!(!DomainError::from(TokenError::InvalidSignature).is_access_token_expiry());
}

#[test]
fn test_error_response_conversion() {
    let response = DomainError::from(ValidationError::RequiredField {
        field: "subject".to_string(),
    })
    .to_error_response();

    assert_eq!(response.error, "VALIDATION_ERROR");
    assert_eq!(response.status, 422);
    assert!(response.message.contains("subject"));
    assert_eq!(response.details["field"], "subject");
}

#[test]
fn test_error_response_upstream_status() {
    let response = DomainError::from(ExchangeError::Status { status: 503 }).to_error_response();

    assert_eq!(response.error, "TOKEN_SERVICE_ERROR");
    assert_eq!(response.status, 502);
    assert_eq!(response.details["upstream_status"], 503);
}

#[test]
fn test_invalid_configuration_is_server_error() {
    let err = DomainError::from(ValidationError::InvalidConfiguration {
        message: "bad ttl".to_string(),
    });
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
