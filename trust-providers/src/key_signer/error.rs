use thiserror::Error;

use crate::crypto::SignerError;

#[derive(Debug, Error)]
pub enum KeySignerError {
    #[error("Invalid key storage `{0}`")]
    InvalidKeyStorage(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(#[source] SignerError),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(#[source] SignerError),
}
