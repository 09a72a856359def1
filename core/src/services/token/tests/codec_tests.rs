//! Unit tests for the JWT codec

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use proptest::prelude::*;
use serde_json::json;

use crate::domain::entities::token::{TokenPayload, TokenType, TOKEN_ISSUER};
use crate::errors::{DomainError, TokenError, ValidationError};
use crate::services::token::TokenCodec;

const SECRET: &str = "codec-secret";
const AUDIENCE: &str = "codec-client";

fn codec() -> TokenCodec {
    TokenCodec::hs256()
}

fn access_payload() -> TokenPayload {
    TokenPayload::access("user-1", AUDIENCE, 1000, 900).unwrap()
}

fn decode(token: &str) -> Result<TokenPayload, DomainError> {
    codec().decode(token, SECRET, TOKEN_ISSUER, AUDIENCE, &[])
}

fn sign_raw(claims: &serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn token_error(result: Result<TokenPayload, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_encode_decode_round_trip() {
    let payload = access_payload().with_email("user-1@example.com");
    let token = codec().encode(&payload, SECRET).unwrap();

    assert_eq!(token.split('.').count(), 3);
    assert_eq!(decode(&token).unwrap(), payload);
}

#[test]
fn test_refresh_type_survives_round_trip() {
    let payload = TokenPayload::refresh("user-1", AUDIENCE, 1000).unwrap();
    let token = codec().encode(&payload, SECRET).unwrap();

    assert_eq!(decode(&token).unwrap().token_type(), TokenType::Refresh);
}

#[test]
fn test_decode_ignores_expiry() {
    let payload = TokenPayload::access("user-1", AUDIENCE, 1, 1).unwrap();
    let token = codec().encode(&payload, SECRET).unwrap();

    assert_eq!(decode(&token).unwrap().expires_at(), 2);
}

#[test]
fn test_encode_rejects_empty_secret() {
    let err = codec().encode(&access_payload(), "").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::RequiredField { ref field }) if field == "secret"
    ));
}

#[test]
fn test_decode_rejects_empty_arguments() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();

    let err = codec().decode("", SECRET, TOKEN_ISSUER, AUDIENCE, &[]).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationError::RequiredField { .. })));

    let err = codec().decode(&token, "", TOKEN_ISSUER, AUDIENCE, &[]).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationError::RequiredField { .. })));

    let err = codec().decode(&token, SECRET, TOKEN_ISSUER, "", &[]).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationError::RequiredField { .. })));
}

#[test]
fn test_wrong_secret_is_invalid_signature() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();
    let result = codec().decode(&token, "another-secret", TOKEN_ISSUER, AUDIENCE, &[]);

    assert_eq!(token_error(result), TokenError::InvalidSignature);
}

#[test]
fn test_any_altered_character_is_invalid_signature() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();

    for (index, ch) in token.char_indices() {
        if ch == '.' {
            continue;
        }
        let replacement = if ch == 'A' { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(index..index + 1, replacement);

        assert_eq!(
            token_error(decode(&tampered)),
            TokenError::InvalidSignature,
            "altered position {}",
            index
        );
    }
}

#[test]
fn test_wrong_issuer_is_invalid_claims() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();
    let result = codec().decode(&token, SECRET, "someone-else", AUDIENCE, &[]);

    assert_eq!(token_error(result), TokenError::InvalidClaims);
}

#[test]
fn test_wrong_audience_is_invalid_claims() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();
    let result = codec().decode(&token, SECRET, TOKEN_ISSUER, "other-client", &[]);

    assert_eq!(token_error(result), TokenError::InvalidClaims);
}

#[test]
fn test_missing_minimum_claim() {
    let token = sign_raw(&json!({
        "aud": AUDIENCE,
        "iss": TOKEN_ISSUER,
        "iat": 1000,
        "exp": 1900,
        "type": "access",
    }));

    assert_eq!(
        token_error(decode(&token)),
        TokenError::MissingClaim {
            claim: "sub".to_string()
        }
    );
}

#[test]
fn test_missing_caller_required_claim() {
    let token = sign_raw(&json!({
        "aud": AUDIENCE,
        "iss": TOKEN_ISSUER,
        "iat": 1000,
        "exp": 1900,
        "sub": "user-1",
    }));
    let result = codec().decode(&token, SECRET, TOKEN_ISSUER, AUDIENCE, &["type"]);

    assert_eq!(
        token_error(result),
        TokenError::MissingClaim {
            claim: "type".to_string()
        }
    );
}

#[test]
fn test_unknown_token_type_is_invalid_claims() {
    let token = sign_raw(&json!({
        "aud": AUDIENCE,
        "iss": TOKEN_ISSUER,
        "iat": 1000,
        "exp": 1900,
        "sub": "user-1",
        "type": "session",
    }));

    assert_eq!(token_error(decode(&token)), TokenError::InvalidClaims);
}

#[test]
fn test_expiry_not_after_issue_is_invalid_claims() {
    let token = sign_raw(&json!({
        "aud": AUDIENCE,
        "iss": TOKEN_ISSUER,
        "iat": 1900,
        "exp": 1900,
        "sub": "user-1",
        "type": "access",
    }));

    assert_eq!(token_error(decode(&token)), TokenError::InvalidClaims);
}

#[test]
fn test_wrong_segment_count_is_malformed() {
    assert_eq!(token_error(decode("not-a-token")), TokenError::InvalidTokenFormat);
    assert_eq!(token_error(decode("header.payload")), TokenError::InvalidTokenFormat);
    assert_eq!(token_error(decode("a.b.c.d")), TokenError::InvalidTokenFormat);
}

#[test]
fn test_signed_but_unreadable_claims_is_malformed() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();
    let header = token.split('.').next().unwrap();
    // base64url("not json")
    let message = format!("{}.bm90IGpzb24", header);
    let signature = jsonwebtoken::crypto::sign(
        message.as_bytes(),
        &EncodingKey::from_secret(SECRET.as_bytes()),
        Algorithm::HS256,
    )
    .unwrap();

    let forged = format!("{}.{}", message, signature);
    assert_eq!(token_error(decode(&forged)), TokenError::InvalidTokenFormat);
}

#[test]
fn test_algorithm_mismatch_is_invalid_signature() {
    let token = codec().encode(&access_payload(), SECRET).unwrap();
    let hs512 = TokenCodec::with_algorithm(Algorithm::HS512).unwrap();
    let result = hs512.decode(&token, SECRET, TOKEN_ISSUER, AUDIENCE, &[]);

    assert_eq!(token_error(result), TokenError::InvalidSignature);
}

#[test]
fn test_hs384_round_trip() {
    let codec = TokenCodec::with_algorithm(Algorithm::HS384).unwrap();
    let payload = access_payload();
    let token = codec.encode(&payload, SECRET).unwrap();

    assert_eq!(codec.algorithm(), Algorithm::HS384);
    assert_eq!(
        codec.decode(&token, SECRET, TOKEN_ISSUER, AUDIENCE, &[]).unwrap(),
        payload
    );
}

#[test]
fn test_asymmetric_algorithm_rejected() {
    let err = TokenCodec::with_algorithm(Algorithm::RS256).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::InvalidConfiguration { .. })
    ));
}

proptest! {
    #[test]
    fn prop_decode_reproduces_encoded_payload(
        subject in "[a-zA-Z0-9_.@-]{1,40}",
        issued_at in 0i64..4_000_000_000,
        ttl in 1i64..1_000_000,
        refresh in any::<bool>(),
    ) {
        let payload = if refresh {
            TokenPayload::refresh(&subject, AUDIENCE, issued_at).unwrap()
        } else {
            TokenPayload::access(&subject, AUDIENCE, issued_at, ttl).unwrap()
        };
        let token = codec().encode(&payload, SECRET).unwrap();

        prop_assert_eq!(decode(&token).unwrap(), payload);
    }
}
