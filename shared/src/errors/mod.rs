//! Error envelope and stable error codes for token failures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body a request handler returns for a failed token operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable code from [`error_codes`]
    pub error: String,

    pub message: String,

    /// HTTP status of the response
    pub status: u16,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status,
            details: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attaches a detail; values that fail to serialize are dropped
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.details.insert(key.into(), value);
        }
        self
    }

    /// Whether the caller can recover by re-authenticating
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Error codes shared by every crate that reports token failures
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_MALFORMED: &str = "TOKEN_MALFORMED";
    pub const TOKEN_TAMPERED: &str = "TOKEN_TAMPERED";
    pub const REFRESH_TOKEN_EXPIRED: &str = "REFRESH_TOKEN_EXPIRED";
    pub const TOKEN_SERVICE_ERROR: &str = "TOKEN_SERVICE_ERROR";
}

/// Conversion from a domain error into the response envelope
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
