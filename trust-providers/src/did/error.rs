//! Enumerates errors related to DID resolution.

use thiserror::Error;

use crate::common_models::did::DidValue;

#[derive(Debug, Error)]
pub enum DidMethodError {
    #[error("DID not found: `{0}`")]
    NotFound(DidValue),
    #[error("Could not resolve: `{0}`")]
    ResolutionError(String),
    #[error("Not supported")]
    NotSupported,
}

#[derive(Debug, Error)]
pub enum DidMethodProviderError {
    #[error("Did method error: `{0}`")]
    DidMethod(#[from] DidMethodError),
    #[error("Missing did method name in did value")]
    MissingDidMethodNameInDidValue,
    #[error("Missing did provider: `{0}`")]
    MissingProvider(String),
}

impl DidMethodProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DidMethod(DidMethodError::NotFound(_)))
    }
}
