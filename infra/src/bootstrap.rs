//! Configuration loading and token manager wiring

use std::sync::Arc;

use tracing::{info, warn};

use tl_core::repositories::InMemoryTokenStore;
use tl_core::services::{TokenManager, TokenManagerConfig};
use tl_shared::config::{AppConfig, Environment, TokenConfig};

use crate::http::{HttpTokenExchangeClient, HttpTokenExchangeConfig};
use crate::InfrastructureError;

/// Loads the application configuration from `.env` files and the process
/// environment
///
/// The environment-specific file (e.g. `.env.production`) is read first, then
/// `.env`; variables already set in the process win over both.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    if config.environment.is_production()
        && (config.token.client_secret.is_empty() || config.token.is_using_default_secret())
    {
        return Err(InfrastructureError::Config(
            "TOKEN_CLIENT_SECRET must be set in production".to_string(),
        ));
    }
    if config.token.is_using_default_secret() {
        warn!(environment = %config.environment, "Using the default client secret");
    }

    Ok(config)
}

/// Builds a token manager over an in-memory store
///
/// Refresh goes through the remote token service when
/// `remote_token_service_url` is set, and is local otherwise.
pub fn build_token_manager(
    config: &TokenConfig,
) -> Result<TokenManager<InMemoryTokenStore>, InfrastructureError> {
    let manager = TokenManager::new(InMemoryTokenStore::new(), TokenManagerConfig::from(config))?;

    match HttpTokenExchangeConfig::from_token_config(config) {
        Some(endpoint) => {
            let client = HttpTokenExchangeClient::new(endpoint)?;
            info!(url = client.url(), "Refreshing through remote token service");
            Ok(manager.with_exchange_client(Arc::new(client)))
        }
        None => {
            info!("Refreshing tokens locally");
            Ok(manager)
        }
    }
}
