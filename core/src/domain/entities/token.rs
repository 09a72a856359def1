//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Refresh token lifetime (30 days), a fixed policy
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Issuer claim of every token minted by this service
pub const TOKEN_ISSUER: &str = "token-lifecycle";

/// Distinguishes access tokens from refresh tokens via the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claim set carried by access and refresh tokens
///
/// Immutable once built; construction enforces non-empty identities and
/// `expires_at > issued_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    aud: String,
    iss: String,
    iat: i64,
    exp: i64,
    sub: String,
    #[serde(rename = "type")]
    token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

impl TokenPayload {
    /// Creates a payload with explicit timestamps
    ///
    /// # Errors
    ///
    /// `ValidationError` when a string claim is empty or `expires_at` is not
    /// after `issued_at`.
    pub fn new(
        token_type: TokenType,
        subject: &str,
        audience: &str,
        issuer: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> Result<Self, DomainError> {
        let payload = Self {
            aud: audience.to_string(),
            iss: issuer.to_string(),
            iat: issued_at,
            exp: expires_at,
            sub: subject.to_string(),
            token_type,
            email: None,
            jti: Some(Uuid::new_v4().to_string()),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Creates access token claims valid for `ttl_seconds` from `issued_at`
    pub fn access(
        subject: &str,
        audience: &str,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Result<Self, DomainError> {
        Self::new(
            TokenType::Access,
            subject,
            audience,
            TOKEN_ISSUER,
            issued_at,
            expiry(issued_at, ttl_seconds)?,
        )
    }

    /// Creates refresh token claims valid for the fixed refresh lifetime
    pub fn refresh(subject: &str, audience: &str, issued_at: i64) -> Result<Self, DomainError> {
        Self::new(
            TokenType::Refresh,
            subject,
            audience,
            TOKEN_ISSUER,
            issued_at,
            expiry(issued_at, REFRESH_TOKEN_TTL_SECONDS)?,
        )
    }

    /// Attaches an email claim
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Checks the structural invariants of the claim set
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [("subject", &self.sub), ("audience", &self.aud), ("issuer", &self.iss)] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field).into());
            }
        }
        if self.exp <= self.iat {
            return Err(ValidationError::InvalidExpiry {
                issued_at: self.iat,
                expires_at: self.exp,
            }
            .into());
        }
        Ok(())
    }

    pub fn audience(&self) -> &str {
        &self.aud
    }

    pub fn issuer(&self) -> &str {
        &self.iss
    }

    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Unique token identifier, absent on tokens minted elsewhere
    pub fn token_id(&self) -> Option<&str> {
        self.jti.as_deref()
    }

    /// Checks expiry against the supplied `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

fn expiry(issued_at: i64, ttl_seconds: i64) -> Result<i64, DomainError> {
    issued_at.checked_add(ttl_seconds).ok_or_else(|| {
        ValidationError::InvalidConfiguration {
            message: format!("token lifetime of {} seconds is out of range", ttl_seconds),
        }
        .into()
    })
}

/// The latest access/refresh pair handed out for a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedTokenPair {
    /// Subject the pair was issued for
    pub subject: String,

    /// Signed access token
    pub access_token: String,

    /// Signed refresh token, withheld after a silent refresh
    pub refresh_token: Option<String>,

    /// Access token expiry (epoch seconds), mirrored for checks without decoding
    pub expires_at: Option<i64>,
}

impl IssuedTokenPair {
    /// Creates a pair for freshly issued tokens
    pub fn new(
        subject: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            subject: subject.into(),
            access_token: access_token.into(),
            refresh_token,
            expires_at: Some(expires_at),
        }
    }

    /// An empty pair scoped to `subject`, carrying no tokens
    pub fn empty(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            access_token: String::new(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Snapshot of this pair with the refresh token removed
    pub fn without_refresh_token(mut self) -> Self {
        self.refresh_token = None;
        self
    }

    /// Fail-closed expiry check: a pair without expiry counts as expired
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.map_or(true, |exp| now >= exp)
    }
}
