//! OAuth2 refresh-token exchange over HTTP
//!
//! Posts the `refresh_token` grant as a form body and parses the JSON token
//! response. One request per call: no retry, no back-off.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use tl_core::errors::{DomainError, ExchangeError};
use tl_core::services::{RefreshTokenRequest, TokenExchangeClient, TokenExchangeResponse};
use tl_shared::config::TokenConfig;

use crate::InfrastructureError;

/// Remote token endpoint configuration
#[derive(Debug, Clone)]
pub struct HttpTokenExchangeConfig {
    /// Token endpoint URL
    pub url: String,
    /// Timeout for the whole request in seconds
    pub request_timeout_secs: u64,
}

impl HttpTokenExchangeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout_secs: 10,
        }
    }

    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Endpoint settings from the token config, if a remote service is configured
    pub fn from_token_config(config: &TokenConfig) -> Option<Self> {
        config.remote_token_service_url.as_ref().map(|url| Self {
            url: url.clone(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

/// reqwest-backed [`TokenExchangeClient`]
#[derive(Debug, Clone)]
pub struct HttpTokenExchangeClient {
    client: reqwest::Client,
    url: String,
}

impl HttpTokenExchangeClient {
    pub fn new(config: HttpTokenExchangeConfig) -> Result<Self, InfrastructureError> {
        if config.url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "token service URL must not be empty".to_string(),
            ));
        }
        if config.request_timeout_secs == 0 {
            return Err(InfrastructureError::Config(
                "token service timeout must be positive".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TokenExchangeClient for HttpTokenExchangeClient {
    async fn exchange_refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<TokenExchangeResponse, DomainError> {
        debug!(url = %self.url, client_id = %request.client_id, "Requesting token refresh");

        let response = self
            .client
            .post(&self.url)
            .form(request)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "Token service unreachable");
                ExchangeError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Token service rejected refresh");
            return Err(ExchangeError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.json::<TokenExchangeResponse>().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Unreadable token service response");
            ExchangeError::InvalidResponse {
                message: e.to_string(),
            }
        })?;

        debug!(
            rotated = body.refresh_token.is_some(),
            expires_in = ?body.expires_in,
            "Token service responded"
        );
        Ok(body)
    }
}
