//! In-memory implementation of TokenStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::token::IssuedTokenPair;
use crate::errors::DomainError;

use super::r#trait::TokenStore;

/// Process-local token store
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    pairs: Arc<RwLock<HashMap<String, IssuedTokenPair>>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects with a stored pair
    pub async fn len(&self) -> usize {
        self.pairs.read().await.len()
    }

    /// Whether no pair has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.pairs.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, subject: &str) -> Result<Option<IssuedTokenPair>, DomainError> {
        let pairs = self.pairs.read().await;
        Ok(pairs.get(subject).cloned())
    }

    async fn put(&self, subject: &str, pair: IssuedTokenPair) -> Result<(), DomainError> {
        let mut pairs = self.pairs.write().await;
        let replaced = pairs.insert(subject.to_string(), pair).is_some();
        debug!(subject, replaced, "Stored token pair");
        Ok(())
    }
}
