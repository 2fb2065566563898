//! Enumerates errors related to key storage provider.

use thiserror::Error;

use crate::{crypto::SignerError, key_algorithm::error::KeyAlgorithmError};

#[derive(Debug, Error)]
pub enum KeyStorageError {
    #[error("Key storage failure: `{0}`")]
    Failed(String),
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
    #[error("Key algorithm error: `{0}`")]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
    #[error("Password decryption failure")]
    PasswordDecryptionFailure,
    #[error("Invalid key algorithm `{0}`")]
    InvalidKeyAlgorithm(String),
}
