//! One-time use of self-issued tokens.

use std::sync::Arc;

use strum::Display;
use time::{Duration, OffsetDateTime};

use super::error::SelfIssuedTokenError;
use crate::storage::replay::ReplayStorage;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClaimOutcome {
    FirstUse,
    AlreadyUsed,
}

pub struct ReplayGuard {
    storage: Arc<dyn ReplayStorage>,
    leeway: Duration,
}

impl ReplayGuard {
    /// Records are kept until `leeway` past the expiry of their token, after
    /// which validation rejects the token anyway.
    pub fn new(storage: Arc<dyn ReplayStorage>, leeway: Duration) -> Self {
        Self { storage, leeway }
    }

    /// Records `jti` as seen without consuming it.
    pub async fn register(
        &self,
        jti: &str,
        expires_at: OffsetDateTime,
    ) -> Result<(), SelfIssuedTokenError> {
        Ok(self
            .storage
            .register(jti, self.retain_until(expires_at))
            .await?)
    }

    pub async fn is_used(&self, jti: &str) -> Result<bool, SelfIssuedTokenError> {
        Ok(self
            .storage
            .get(jti)
            .await?
            .is_some_and(|record| record.used))
    }

    /// Consumes `jti`. Exactly one caller per `jti` ever gets
    /// [`ClaimOutcome::FirstUse`], concurrent callers included.
    pub async fn claim(
        &self,
        jti: &str,
        expires_at: OffsetDateTime,
    ) -> Result<ClaimOutcome, SelfIssuedTokenError> {
        if self
            .storage
            .mark_used(jti, self.retain_until(expires_at))
            .await?
        {
            Ok(ClaimOutcome::FirstUse)
        } else {
            tracing::warn!(%jti, "replayed self-issued token");
            Ok(ClaimOutcome::AlreadyUsed)
        }
    }

    fn retain_until(&self, expires_at: OffsetDateTime) -> OffsetDateTime {
        expires_at.saturating_add(self.leeway)
    }
}
