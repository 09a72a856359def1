//! Tracing subscriber initialisation

use tracing_subscriber::EnvFilter;

use tl_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Installs the global tracing subscriber described by `config`
///
/// `RUST_LOG`, when set, takes precedence over `config.level`. Returns
/// `Ok(false)` when a subscriber was already installed, so repeated calls are
/// harmless.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::Config(format!("invalid log level '{}': {}", config.level, e))
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .is_ok();

    if installed {
        tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialised");
    }
    Ok(installed)
}
