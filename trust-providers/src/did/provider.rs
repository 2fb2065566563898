//! DID resolver dispatching to the DID method named in the DID.

use std::sync::Arc;

use crate::{
    common_models::did::DidValue,
    did::{error::DidMethodProviderError, model::DidDocument, DidMethod},
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DidMethodProvider: Send + Sync {
    fn get_did_method(&self, did_method_id: &str) -> Option<Arc<dyn DidMethod>>;

    /// Resolves the DID document, or fails with a not-found error when the DID
    /// does not exist.
    async fn resolve(&self, did: &DidValue) -> Result<DidDocument, DidMethodProviderError>;
}
