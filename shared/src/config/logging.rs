//! Log output configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `tl_core=debug,info`
    pub level: String,

    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// ANSI colours; ignored by the JSON format
    #[serde(default)]
    pub colored: bool,

    /// Include file and line of the emitting call site
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Baseline for `env`: verbose pretty output in development, JSON elsewhere
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("info,tl_core=warn", LogFormat::Json),
        };
        Self {
            level: level.to_string(),
            format,
            colored: env.is_development(),
            source_location: env.is_development(),
        }
    }

    /// Overlay `LOG_LEVEL` and `LOG_FORMAT` from `lookup` on top of `self`
    ///
    /// An unrecognised format keeps the current one.
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT").and_then(|f| f.parse().ok()) {
            self.format = format;
        }
        self
    }
}

fn default_format() -> LogFormat {
    LogFormat::Json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_baselines() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.colored && dev.source_location);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod.format, LogFormat::Json);
        assert!(!prod.colored);
    }

    #[test]
    fn test_overlay() {
        let config = LoggingConfig::for_environment(Environment::Staging).overlay(|key| match key {
            "LOG_LEVEL" => Some("trace".to_string()),
            "LOG_FORMAT" => Some("compact".to_string()),
            _ => None,
        });
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_overlay_ignores_bad_values() {
        let base = LoggingConfig::for_environment(Environment::Staging);
        let config = base.clone().overlay(|key| match key {
            "LOG_LEVEL" => Some("  ".to_string()),
            "LOG_FORMAT" => Some("xml".to_string()),
            _ => None,
        });
        assert_eq!(config, base);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"level":"warn"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.colored);
    }
}
