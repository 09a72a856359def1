//! Token store trait defining the registry of issued token pairs.

use async_trait::async_trait;

use crate::domain::entities::token::IssuedTokenPair;
use crate::errors::DomainError;

/// Registry of the most recently issued token pair per subject
///
/// Holds at most one pair per subject; the last `put` wins and no history
/// is retained. Every read returns an owned snapshot, so callers never hold
/// a reference into the store.
///
/// Individual `get`/`put` calls must be atomic. Serializing a
/// read-modify-write for one subject is the caller's job (the token manager
/// holds a per-subject lock around it).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Fetch the stored pair for a subject
    ///
    /// # Returns
    /// * `Ok(Some(IssuedTokenPair))` - Snapshot of the stored pair
    /// * `Ok(None)` - Nothing was issued for this subject yet
    /// * `Err(DomainError)` - Backend failure
    ///
    /// # Example
    /// ```no_run
    /// # use tl_core::repositories::TokenStore;
    /// # async fn example(store: &impl TokenStore) -> Result<(), Box<dyn std::error::Error>> {
    /// match store.get("user-42").await? {
    ///     Some(pair) => println!("Access token expires at {:?}", pair.expires_at),
    ///     None => println!("No tokens issued yet"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn get(&self, subject: &str) -> Result<Option<IssuedTokenPair>, DomainError>;

    /// Store a pair for a subject, replacing any existing entry
    ///
    /// # Arguments
    /// * `subject` - Key to store the pair under
    /// * `pair` - The pair to store
    async fn put(&self, subject: &str, pair: IssuedTokenPair) -> Result<(), DomainError>;
}
