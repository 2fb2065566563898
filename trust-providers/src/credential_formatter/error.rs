//! Enumerates errors for credential formatter provider.

use thiserror::Error;

use crate::crypto::{CryptoProviderError, HasherError};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum FormatterError {
    #[error("Failed: `{0}`")]
    Failed(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not extract token: `{0}`")]
    CouldNotExtractToken(String),
    #[error("Could not extract presentation: `{0}`")]
    CouldNotExtractPresentation(String),
    #[error("Missing issuer")]
    MissingIssuer,
    #[error("Crypto library error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
    #[error("Hasher error: `{0}`")]
    HasherError(#[from] HasherError),
    #[error("JSON mapping error: `{0}`")]
    JsonMapping(String),
}
