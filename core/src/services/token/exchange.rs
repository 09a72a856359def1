//! Remote refresh-token exchange contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Form body of an OAuth2 `refresh_token` grant
#[derive(Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub grant_type: &'static str,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl RefreshTokenRequest {
    pub fn new(
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: "refresh_token",
            refresh_token: refresh_token.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keeps credentials out of logs
impl std::fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest")
            .field("grant_type", &self.grant_type)
            .field("refresh_token", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Token endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    /// Rotated refresh token, if the service issued one
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Client for a remote token service that trades refresh tokens for new
/// access tokens
///
/// Implementations make exactly one request per call; retries are the
/// caller's decision.
#[async_trait]
pub trait TokenExchangeClient: Send + Sync {
    async fn exchange_refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<TokenExchangeResponse, DomainError>;
}
