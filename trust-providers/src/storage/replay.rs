use time::OffsetDateTime;

use crate::storage::StorageError;

/// One-time-use marker of a token id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplayRecord {
    pub jti: String,
    pub used: bool,
    /// The record may be discarded after this instant.
    pub expires_at: OffsetDateTime,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ReplayStorage: Send + Sync {
    async fn get(&self, jti: &str) -> Result<Option<ReplayRecord>, StorageError>;

    /// Creates an unused record unless one exists.
    async fn register(&self, jti: &str, expires_at: OffsetDateTime) -> Result<(), StorageError>;

    /// Atomically marks the record used, creating it when absent.
    ///
    /// Returns `true` for the single caller that performed the transition and
    /// `false` when the record was already used. Implementations must make
    /// concurrent calls for one `jti` observe exactly one `true`.
    async fn mark_used(&self, jti: &str, expires_at: OffsetDateTime)
        -> Result<bool, StorageError>;
}
