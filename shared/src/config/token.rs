//! Token issuance and refresh configuration

use serde::{Deserialize, Serialize};

const DEFAULT_CLIENT_SECRET: &str = "development-secret-please-change-in-production";

/// Token lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Client identifier, used as the token audience
    pub client_id: String,

    /// Client secret, used as the HMAC signing key and sent to the remote
    /// token service on refresh
    pub client_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_seconds: i64,

    /// Remote token-exchange endpoint; refresh is local when absent
    #[serde(default)]
    pub remote_token_service_url: Option<String>,

    /// Timeout for the remote token-exchange call in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            client_id: String::from("token-lifecycle-client"),
            client_secret: String::from(DEFAULT_CLIENT_SECRET),
            access_token_ttl_seconds: default_access_token_ttl(),
            remote_token_service_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with client credentials
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_seconds = minutes.saturating_mul(60);
        self
    }

    /// Route refreshes through a remote token-exchange endpoint
    pub fn with_remote_token_service(mut self, url: impl Into<String>) -> Self {
        self.remote_token_service_url = Some(url.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.client_secret == DEFAULT_CLIENT_SECRET
    }

    /// Overlay values produced by `lookup` on top of `base`
    ///
    /// Unparseable numeric values keep the base value.
    pub fn from_lookup<F>(base: Self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: lookup("TOKEN_CLIENT_ID").unwrap_or(base.client_id),
            client_secret: lookup("TOKEN_CLIENT_SECRET").unwrap_or(base.client_secret),
            access_token_ttl_seconds: lookup("ACCESS_TOKEN_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.access_token_ttl_seconds),
            remote_token_service_url: lookup("TOKEN_SERVICE_URL")
                .filter(|url| !url.trim().is_empty())
                .or(base.remote_token_service_url),
            request_timeout_secs: lookup("TOKEN_SERVICE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.request_timeout_secs),
        }
    }
}

fn default_access_token_ttl() -> i64 {
    900 // 15 minutes
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = TokenConfig::default();
        assert_eq!(config.access_token_ttl_seconds, 900);
        assert!(config.is_using_default_secret());
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_builders() {
        let config = TokenConfig::new("client", "secret")
            .with_access_ttl_minutes(5)
            .with_remote_token_service("https://auth.example.com/token");

        assert_eq!(config.access_token_ttl_seconds, 300);
        assert_eq!(
            config.remote_token_service_url.as_deref(),
            Some("https://auth.example.com/token")
        );
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOKEN_CLIENT_ID", "web"),
            ("TOKEN_CLIENT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_TTL_SECONDS", "60"),
            ("TOKEN_SERVICE_URL", "http://localhost:9000/oauth/token"),
        ]
        .into_iter()
        .collect();

        let config = TokenConfig::from_lookup(TokenConfig::default(), |key| {
            vars.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.client_id, "web");
        assert_eq!(config.client_secret, "s3cret");
        assert_eq!(config.access_token_ttl_seconds, 60);
        assert_eq!(
            config.remote_token_service_url.as_deref(),
            Some("http://localhost:9000/oauth/token")
        );
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = TokenConfig::from_lookup(TokenConfig::default(), |key| match key {
            "ACCESS_TOKEN_TTL_SECONDS" => Some("fifteen".to_string()),
            "TOKEN_SERVICE_URL" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.access_token_ttl_seconds, 900);
        assert!(config.remote_token_service_url.is_none());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: TokenConfig =
            serde_json::from_str(r#"{"client_id":"a","client_secret":"b"}"#).unwrap();
        assert_eq!(config.access_token_ttl_seconds, 900);
        assert!(config.remote_token_service_url.is_none());
    }
}
