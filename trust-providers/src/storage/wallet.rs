use crate::{
    common_models::{did::DidValue, wallet::Wallet},
    storage::StorageError,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait WalletStorage: Send + Sync {
    async fn get_by_did(&self, did: &DidValue) -> Result<Option<Wallet>, StorageError>;
}
