//! JWT encoding and verification for token payloads

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::entities::token::TokenPayload;
use crate::errors::{DomainError, TokenError, ValidationError};

/// Claims every token must carry regardless of what the caller asks for
pub const REQUIRED_CLAIMS: [&str; 5] = ["aud", "iss", "iat", "exp", "sub"];

/// Stateless HMAC signer/verifier for [`TokenPayload`]
///
/// Expiry is never enforced here; callers compare `exp` against their own
/// clock so the decision stays testable.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::hs256()
    }
}

impl TokenCodec {
    /// Codec signing with HMAC-SHA256
    pub fn hs256() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Codec for another HMAC algorithm
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidConfiguration` for non-HMAC algorithms, which
    /// cannot be keyed from a shared secret.
    pub fn with_algorithm(algorithm: Algorithm) -> Result<Self, DomainError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self { algorithm }),
            other => Err(ValidationError::InvalidConfiguration {
                message: format!("unsupported signing algorithm {:?}", other),
            }
            .into()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Signs `payload` with `secret` and returns the compact JWT
    ///
    /// # Errors
    ///
    /// * `ValidationError` - empty secret or a payload violating its invariants
    /// * `TokenError::TokenGenerationFailed` - the signer rejected the input
    pub fn encode(&self, payload: &TokenPayload, secret: &str) -> Result<String, DomainError> {
        if secret.is_empty() {
            return Err(ValidationError::required("secret").into());
        }
        payload.validate()?;

        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(self.algorithm), payload, &key).map_err(|e| {
            debug!(error = %e, "JWT encoding failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies signature, issuer and audience, then rebuilds the payload
    ///
    /// `required_claims` is merged with [`REQUIRED_CLAIMS`]; each name must be
    /// present in the claim set.
    ///
    /// # Errors
    ///
    /// * `ValidationError::RequiredField` - an empty argument
    /// * `TokenError::InvalidSignature` - signature does not match the content
    /// * `TokenError::InvalidTokenFormat` - not a three-segment JWT
    /// * `TokenError::MissingClaim` - a required claim is absent
    /// * `TokenError::InvalidClaims` - issuer or audience mismatch, or claims
    ///   that do not form a valid payload
    pub fn decode(
        &self,
        token: &str,
        secret: &str,
        issuer: &str,
        audience: &str,
        required_claims: &[&str],
    ) -> Result<TokenPayload, DomainError> {
        for (field, value) in [
            ("token", token),
            ("secret", secret),
            ("issuer", issuer),
            ("audience", audience),
        ] {
            if value.is_empty() {
                return Err(ValidationError::required(field).into());
            }
        }

        let mut required: Vec<&str> = REQUIRED_CLAIMS.to_vec();
        for &claim in required_claims {
            if !required.contains(&claim) {
                required.push(claim);
            }
        }

        let key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);

        let claims = decode::<Map<String, Value>>(token, &key, &validation)
            .map_err(|e| self.map_decode_error(e.kind(), token, &key))?
            .claims;

        if let Some(missing) = required.iter().find(|claim| !claims.contains_key(**claim)) {
            return Err(TokenError::MissingClaim {
                claim: missing.to_string(),
            }
            .into());
        }

        let payload: TokenPayload = serde_json::from_value(Value::Object(claims)).map_err(|e| {
            debug!(error = %e, "Token claims do not form a payload");
            DomainError::Token(TokenError::InvalidClaims)
        })?;

        if payload.expires_at() <= payload.issued_at() {
            return Err(TokenError::InvalidClaims.into());
        }

        Ok(payload)
    }

    fn map_decode_error(&self, kind: &ErrorKind, token: &str, key: &DecodingKey) -> DomainError {
        let error = match kind {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::InvalidSubject => {
                TokenError::InvalidClaims
            }
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                claim: claim.clone(),
            },
            ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
            _ => self.classify_unreadable(token, key),
        };
        debug!(?kind, "Token rejected: {}", error);
        error.into()
    }

    /// A three-segment token whose header or claims cannot be parsed was
    /// altered after signing unless its signature still verifies.
    fn classify_unreadable(&self, token: &str, key: &DecodingKey) -> TokenError {
        let Some((message, signature)) = token.rsplit_once('.') else {
            return TokenError::InvalidTokenFormat;
        };
        if message.split('.').count() != 2 {
            return TokenError::InvalidTokenFormat;
        }
        match jsonwebtoken::crypto::verify(signature, message.as_bytes(), key, self.algorithm) {
            Ok(true) => TokenError::InvalidTokenFormat,
            _ => TokenError::InvalidSignature,
        }
    }
}
