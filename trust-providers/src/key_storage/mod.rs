//! Storage of wallet signing keys.
//!
//! Private keys never leave a key storage: callers hold a [`KeyHandle`] and
//! ask the storage to sign with it.

use crate::{
    common_models::key::{KeyHandle, KeyId},
    crypto::SignerError,
};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait KeyStorage: Send + Sync {
    async fn generate(
        &self,
        key_id: &KeyId,
        key_type: &str,
    ) -> Result<model::StorageGeneratedKey, error::KeyStorageError>;

    async fn sign(&self, key: &KeyHandle, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}
