//! Configuration for the token manager

use jsonwebtoken::Algorithm;
use tl_shared::config::TokenConfig;

use crate::domain::entities::token::{DEFAULT_ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS};
use crate::errors::{DomainError, ValidationError};

/// Configuration for the token manager
#[derive(Debug, Clone)]
pub struct TokenManagerConfig {
    /// Client identifier, used as the audience claim
    pub client_id: String,
    /// Client secret, used as the HMAC signing key
    pub client_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
}

impl Default for TokenManagerConfig {
    fn default() -> Self {
        Self {
            client_id: "token-lifecycle-client".to_string(),
            client_secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            algorithm: Algorithm::HS256,
        }
    }
}

impl TokenManagerConfig {
    /// Creates a configuration with the default access token lifetime
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Default::default()
        }
    }

    /// Overrides the access token lifetime
    pub fn with_access_token_ttl(mut self, seconds: i64) -> Self {
        self.access_token_ttl_seconds = seconds;
        self
    }

    /// Refresh token lifetime; fixed, not configurable
    pub const fn refresh_token_ttl_seconds(&self) -> i64 {
        REFRESH_TOKEN_TTL_SECONDS
    }

    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::required("client_id").into());
        }
        if self.client_secret.is_empty() {
            return Err(ValidationError::required("client_secret").into());
        }
        if !(1..=REFRESH_TOKEN_TTL_SECONDS).contains(&self.access_token_ttl_seconds) {
            return Err(ValidationError::InvalidConfiguration {
                message: format!(
                    "access token TTL must be between 1 and {} seconds, got {}",
                    REFRESH_TOKEN_TTL_SECONDS, self.access_token_ttl_seconds
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl From<&TokenConfig> for TokenManagerConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            access_token_ttl_seconds: config.access_token_ttl_seconds,
            algorithm: Algorithm::HS256,
        }
    }
}
