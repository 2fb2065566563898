use crate::{
    common_models::{credential::HeldCredential, did::DidValue},
    storage::StorageError,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CredentialStorage: Send + Sync {
    /// Credentials held by `holder` carrying `credential_type` among their types.
    async fn get_held_by(
        &self,
        holder: &DidValue,
        credential_type: &str,
    ) -> Result<Vec<HeldCredential>, StorageError>;
}
