//! Token lifecycle manager: issuance, expiry checks and refresh per subject

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{IssuedTokenPair, TokenPayload, TokenType, TOKEN_ISSUER};
use crate::errors::{AuthError, DomainError, ExchangeError, TokenError, ValidationError};
use crate::repositories::TokenStore;

use super::clock::{Clock, SystemClock};
use super::codec::TokenCodec;
use super::config::TokenManagerConfig;
use super::exchange::{RefreshTokenRequest, TokenExchangeClient};
use super::locks::SubjectLocks;

/// Issues, hands out and refreshes token pairs, one current pair per subject
///
/// Every operation that reads and then writes the store holds the subject's
/// lock for its whole duration, remote calls included.
pub struct TokenManager<S: TokenStore> {
    store: S,
    config: TokenManagerConfig,
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    exchange: Option<Arc<dyn TokenExchangeClient>>,
    locks: SubjectLocks,
}

impl<S: TokenStore> TokenManager<S> {
    /// Creates a manager on the system clock with local refresh
    ///
    /// # Arguments
    ///
    /// * `store` - Token store holding the current pair per subject
    /// * `config` - Client credentials and access token lifetime
    ///
    /// # Returns
    ///
    /// A new `TokenManager`, or a `ValidationError` for an unusable config
    pub fn new(store: S, config: TokenManagerConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let codec = TokenCodec::with_algorithm(config.algorithm)?;

        Ok(Self {
            store,
            config,
            codec,
            clock: Arc::new(SystemClock),
            exchange: None,
            locks: SubjectLocks::default(),
        })
    }

    /// Replaces the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Delegates refresh to a remote token service
    pub fn with_exchange_client(mut self, client: Arc<dyn TokenExchangeClient>) -> Self {
        self.exchange = Some(client);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TokenManagerConfig {
        &self.config
    }

    pub fn uses_remote_refresh(&self) -> bool {
        self.exchange.is_some()
    }

    /// Fail-closed expiry check against the manager's clock
    pub fn is_expired(&self, expires_at: Option<i64>) -> bool {
        expires_at.map_or(true, |exp| self.clock.now() >= exp)
    }

    /// Mints a fresh access/refresh pair for `subject` and stores it
    ///
    /// Any existing pair is replaced; calling twice yields two distinct pairs.
    pub async fn issue(&self, subject: &str) -> Result<IssuedTokenPair, DomainError> {
        ensure_subject(subject)?;
        let _guard = self.locks.acquire(subject).await;
        self.issue_locked(subject).await
    }

    /// Returns a usable pair for `subject`, issuing or refreshing as needed
    ///
    /// A pair returned after a silent refresh carries no refresh token.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrMalformedToken` - the stored access token fails
    ///   verification for any reason other than expiry
    /// * `AuthError::TamperedToken` - the stored pair or its access token names
    ///   another subject
    /// * Any error from [`TokenManager::refresh`] when the token had expired
    pub async fn get_access_token(&self, subject: &str) -> Result<IssuedTokenPair, DomainError> {
        ensure_subject(subject)?;
        let _guard = self.locks.acquire(subject).await;

        let Some(stored) = self.store.get(subject).await? else {
            debug!(subject, "No token pair stored, issuing");
            return self.issue_locked(subject).await;
        };

        if stored.subject != subject {
            warn!(subject, "Stored token pair is keyed to another subject");
            return Err(AuthError::TamperedToken.into());
        }

        match self.verify_token(&stored.access_token, TokenType::Access) {
            Ok(payload) if payload.subject() != subject => {
                warn!(subject, "Stored access token names another subject");
                Err(AuthError::TamperedToken.into())
            }
            Ok(_) => Ok(stored),
            Err(DomainError::Token(TokenError::TokenExpired)) => {
                debug!(subject, "Access token expired, refreshing");
                let refreshed = self.refresh_locked(subject, Some(stored)).await?;
                Ok(refreshed.without_refresh_token())
            }
            Err(e) => {
                warn!(subject, error = %e, "Stored access token rejected");
                Err(AuthError::InvalidOrMalformedToken.into())
            }
        }
    }

    /// Exchanges the refresh token of `pair` for a new access token
    ///
    /// With an exchange client attached the remote service is asked once;
    /// otherwise a new access token is minted locally from a valid refresh
    /// token. A pair without a refresh token falls back to the stored one.
    ///
    /// # Errors
    ///
    /// * `ValidationError::TamperedRefreshToken` - subject mismatch, or a token
    ///   of the wrong type presented as refresh token
    /// * `TokenError::InvalidRefreshToken` - no refresh token available
    /// * `TokenError::RefreshTokenExpired` - re-authentication is required
    /// * `ExchangeError` - the remote service failed; never retried
    pub async fn refresh(
        &self,
        subject: &str,
        pair: Option<IssuedTokenPair>,
    ) -> Result<IssuedTokenPair, DomainError> {
        ensure_subject(subject)?;
        let _guard = self.locks.acquire(subject).await;
        self.refresh_locked(subject, pair).await
    }

    /// Verifies a bearer access token against the manager's clock
    pub fn verify_access_token(&self, token: &str) -> Result<TokenPayload, DomainError> {
        self.verify_token(token, TokenType::Access)
    }

    /// Verifies a refresh token against the manager's clock
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenPayload, DomainError> {
        self.verify_token(token, TokenType::Refresh)
    }

    /// Current stored pair for `subject`, without issuing or refreshing
    pub async fn peek_pair(&self, subject: &str) -> Result<Option<IssuedTokenPair>, DomainError> {
        self.store.get(subject).await
    }

    async fn issue_locked(&self, subject: &str) -> Result<IssuedTokenPair, DomainError> {
        let now = self.clock.now();
        let access = TokenPayload::access(
            subject,
            &self.config.client_id,
            now,
            self.config.access_token_ttl_seconds,
        )?;
        let refresh = TokenPayload::refresh(subject, &self.config.client_id, now)?;

        let access_token = self.codec.encode(&access, &self.config.client_secret)?;
        let refresh_token = self.codec.encode(&refresh, &self.config.client_secret)?;

        let pair = IssuedTokenPair::new(
            subject,
            access_token,
            Some(refresh_token),
            access.expires_at(),
        );
        self.store.put(subject, pair.clone()).await?;

        info!(subject, expires_at = access.expires_at(), "Issued token pair");
        Ok(pair)
    }

    async fn refresh_locked(
        &self,
        subject: &str,
        pair: Option<IssuedTokenPair>,
    ) -> Result<IssuedTokenPair, DomainError> {
        let stored = self.store.get(subject).await?;
        if stored.as_ref().is_some_and(|s| s.subject != subject) {
            warn!(subject, "Stored token pair is keyed to another subject");
            return Err(ValidationError::TamperedRefreshToken.into());
        }

        let supplied = pair.is_some();
        let target = pair.unwrap_or_else(|| IssuedTokenPair::empty(subject));
        if target.subject != subject {
            warn!(subject, "Refresh requested with a pair for another subject");
            return Err(ValidationError::TamperedRefreshToken.into());
        }

        let refresh_token = match target.refresh_token {
            Some(token) => token,
            None if supplied => stored
                .and_then(|s| s.refresh_token)
                .ok_or(TokenError::InvalidRefreshToken)?,
            None => return Err(TokenError::InvalidRefreshToken.into()),
        };

        let updated = match &self.exchange {
            Some(exchange) => {
                self.refresh_remote(exchange.as_ref(), subject, refresh_token)
                    .await?
            }
            None => self.refresh_local(subject, refresh_token)?,
        };

        self.store.put(subject, updated.clone()).await?;
        info!(
            subject,
            remote = self.exchange.is_some(),
            expires_at = updated.expires_at,
            "Refreshed access token"
        );
        Ok(updated)
    }

    fn refresh_local(
        &self,
        subject: &str,
        refresh_token: String,
    ) -> Result<IssuedTokenPair, DomainError> {
        let payload = match self.verify_token(&refresh_token, TokenType::Refresh) {
            Ok(payload) => payload,
            Err(DomainError::Token(TokenError::TokenTypeMismatch { actual, .. })) => {
                warn!(subject, %actual, "Non-refresh token presented for refresh");
                return Err(ValidationError::TamperedRefreshToken.into());
            }
            Err(e) => return Err(e),
        };
        if payload.subject() != subject {
            warn!(subject, "Refresh token names another subject");
            return Err(ValidationError::TamperedRefreshToken.into());
        }

        let access = TokenPayload::access(
            subject,
            &self.config.client_id,
            self.clock.now(),
            self.config.access_token_ttl_seconds,
        )?;
        let access_token = self.codec.encode(&access, &self.config.client_secret)?;

        Ok(IssuedTokenPair::new(
            subject,
            access_token,
            Some(refresh_token),
            access.expires_at(),
        ))
    }

    async fn refresh_remote(
        &self,
        exchange: &dyn TokenExchangeClient,
        subject: &str,
        refresh_token: String,
    ) -> Result<IssuedTokenPair, DomainError> {
        // Our own tokens can be screened for misuse before going over the wire
        if let Ok(payload) = self.codec.decode(
            &refresh_token,
            &self.config.client_secret,
            TOKEN_ISSUER,
            &self.config.client_id,
            &["type"],
        ) {
            if payload.token_type() != TokenType::Refresh || payload.subject() != subject {
                warn!(subject, "Refusing to exchange a token that is not this subject's refresh token");
                return Err(ValidationError::TamperedRefreshToken.into());
            }
        }

        let request = RefreshTokenRequest::new(
            refresh_token.clone(),
            self.config.client_id.clone(),
            self.config.client_secret.clone(),
        );
        let response = exchange.exchange_refresh_token(&request).await?;

        let expires_in = response
            .expires_in
            .unwrap_or(self.config.access_token_ttl_seconds);
        if expires_in <= 0 {
            return Err(ExchangeError::InvalidResponse {
                message: format!("non-positive expires_in {}", expires_in),
            }
            .into());
        }

        let access = self.verify_token(&response.access_token, TokenType::Access)?;
        if access.subject() != subject {
            warn!(subject, "Token service returned an access token for another subject");
            return Err(AuthError::TamperedToken.into());
        }

        let expires_at = self.clock.now().checked_add(expires_in).ok_or_else(|| {
            ExchangeError::InvalidResponse {
                message: format!("expires_in {} is out of range", expires_in),
            }
        })?;

        let rotated = response.refresh_token.is_some();
        debug!(subject, rotated, expires_in, "Token service refreshed access token");

        Ok(IssuedTokenPair::new(
            subject,
            response.access_token,
            Some(response.refresh_token.unwrap_or(refresh_token)),
            expires_at,
        ))
    }

    /// Decodes `token`, then checks its type before its expiry
    fn verify_token(&self, token: &str, expected: TokenType) -> Result<TokenPayload, DomainError> {
        let payload = self.codec.decode(
            token,
            &self.config.client_secret,
            TOKEN_ISSUER,
            &self.config.client_id,
            &["type"],
        )?;

        if payload.token_type() != expected {
            return Err(TokenError::TokenTypeMismatch {
                expected,
                actual: payload.token_type(),
            }
            .into());
        }

        if payload.is_expired_at(self.clock.now()) {
            return Err(match expected {
                TokenType::Access => TokenError::TokenExpired,
                TokenType::Refresh => TokenError::RefreshTokenExpired,
            }
            .into());
        }

        Ok(payload)
    }
}

fn ensure_subject(subject: &str) -> Result<(), DomainError> {
    if subject.trim().is_empty() {
        return Err(ValidationError::required("subject").into());
    }
    Ok(())
}
