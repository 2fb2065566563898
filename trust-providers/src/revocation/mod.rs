//! Revocation status checks of held credentials.
//!
//! Status lists are maintained by an external service; this module only asks
//! for the current state of a `credentialStatus` entry.

use crate::{
    credential_formatter::model::CredentialStatus,
    revocation::{error::RevocationError, model::CredentialRevocationState},
};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RevocationMethod: Send + Sync {
    /// The `credentialStatus.type` values handled by this method.
    fn get_status_types(&self) -> Vec<String>;

    /// Checks the revocation status of a credential.
    async fn check_credential_revocation_status(
        &self,
        credential_status: &CredentialStatus,
    ) -> Result<CredentialRevocationState, RevocationError>;
}
