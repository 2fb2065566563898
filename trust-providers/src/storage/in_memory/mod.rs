//! In-memory storages, for tests and single-instance deployments.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    common_models::{credential::HeldCredential, did::DidValue, wallet::Wallet},
    storage::{
        credential::CredentialStorage,
        replay::{ReplayRecord, ReplayStorage},
        wallet::WalletStorage,
        StorageError,
    },
};

#[cfg(test)]
mod test;

#[derive(Clone, Default)]
pub struct InMemoryWalletStorage {
    storage: Arc<Mutex<HashMap<DidValue, Wallet>>>,
}

impl InMemoryWalletStorage {
    pub fn new(wallets: Vec<Wallet>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(
                wallets
                    .into_iter()
                    .map(|wallet| (wallet.did.to_owned(), wallet))
                    .collect(),
            )),
        }
    }

    pub async fn insert(&self, wallet: Wallet) {
        self.storage
            .lock()
            .await
            .insert(wallet.did.to_owned(), wallet);
    }
}

#[async_trait]
impl WalletStorage for InMemoryWalletStorage {
    async fn get_by_did(&self, did: &DidValue) -> Result<Option<Wallet>, StorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle.get(did).cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCredentialStorage {
    storage: Arc<Mutex<Vec<HeldCredential>>>,
}

impl InMemoryCredentialStorage {
    pub fn new(credentials: Vec<HeldCredential>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(credentials)),
        }
    }

    pub async fn insert(&self, credential: HeldCredential) {
        self.storage.lock().await.push(credential);
    }
}

#[async_trait]
impl CredentialStorage for InMemoryCredentialStorage {
    async fn get_held_by(
        &self,
        holder: &DidValue,
        credential_type: &str,
    ) -> Result<Vec<HeldCredential>, StorageError> {
        let handle = self.storage.lock().await;

        Ok(handle
            .iter()
            .filter(|credential| &credential.holder == holder)
            .filter(|credential| credential.has_type(credential_type))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryReplayStorage {
    storage: Arc<Mutex<HashMap<String, ReplayRecord>>>,
}

impl InMemoryReplayStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReplayStorage for InMemoryReplayStorage {
    async fn get(&self, jti: &str) -> Result<Option<ReplayRecord>, StorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle
            .get(jti)
            .filter(|record| !is_stale(record, OffsetDateTime::now_utc()))
            .cloned())
    }

    async fn register(&self, jti: &str, expires_at: OffsetDateTime) -> Result<(), StorageError> {
        let mut hash_map_handle = self.storage.lock().await;
        prune(&mut hash_map_handle);

        hash_map_handle
            .entry(jti.to_owned())
            .or_insert_with(|| ReplayRecord {
                jti: jti.to_owned(),
                used: false,
                expires_at,
            });

        Ok(())
    }

    async fn mark_used(
        &self,
        jti: &str,
        expires_at: OffsetDateTime,
    ) -> Result<bool, StorageError> {
        // check and set under one lock acquisition
        let mut hash_map_handle = self.storage.lock().await;
        prune(&mut hash_map_handle);

        let record = hash_map_handle
            .entry(jti.to_owned())
            .or_insert_with(|| ReplayRecord {
                jti: jti.to_owned(),
                used: false,
                expires_at,
            });

        if record.used {
            return Ok(false);
        }

        record.used = true;
        Ok(true)
    }
}

fn is_stale(record: &ReplayRecord, now: OffsetDateTime) -> bool {
    record.expires_at < now
}

fn prune(records: &mut HashMap<String, ReplayRecord>) {
    let now = OffsetDateTime::now_utc();
    records.retain(|_, record| !is_stale(record, now));
}
