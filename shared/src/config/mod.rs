//! Configuration for the token lifecycle services
//!
//! - `environment` - deployment environment detection
//! - `logging` - tracing subscriber settings
//! - `token` - client credentials, lifetimes and the remote token service

pub mod environment;
pub mod logging;
pub mod token;

use serde::{Deserialize, Serialize};

pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use token::TokenConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub token: TokenConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Baseline configuration for `environment`, before any overrides
    ///
    /// Production carries no usable client secret; it must come from
    /// `TOKEN_CLIENT_SECRET`.
    pub fn for_environment(environment: Environment) -> Self {
        let token = if environment.is_production() {
            TokenConfig::new("token-lifecycle-client", "")
        } else {
            TokenConfig::default()
        };
        Self {
            environment,
            token,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from the variables `lookup` resolves
    ///
    /// The environment picks the baseline; token and logging variables
    /// override it.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        let base = Self::for_environment(environment);
        Self {
            environment,
            token: TokenConfig::from_lookup(base.token, &lookup),
            logging: base.logging.overlay(&lookup),
        }
    }
}
