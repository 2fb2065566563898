//! Internal key storage: key references hold the private key, sealed with a
//! passphrase-derived key when one is configured.

use std::sync::Arc;

use cocoon::MiniCocoon;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{
    common_models::key::{KeyHandle, KeyId},
    crypto::{utilities, SignerError},
    key_algorithm::provider::KeyAlgorithmProvider,
    key_storage::{error::KeyStorageError, model::StorageGeneratedKey, KeyStorage},
};

#[cfg(test)]
mod test;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub encryption: Option<String>,
}

pub struct InternalKeyStorage {
    key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    cipher: KeyCipher,
}

impl InternalKeyStorage {
    pub fn new(key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>, params: Params) -> Self {
        Self {
            key_algorithm_provider,
            cipher: KeyCipher::new(params.encryption.as_deref()),
        }
    }
}

#[async_trait::async_trait]
impl KeyStorage for InternalKeyStorage {
    async fn sign(&self, key: &KeyHandle, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let signer = self
            .key_algorithm_provider
            .get_signer(&key.key_type)
            .map_err(|e| SignerError::MissingAlgorithm(e.to_string()))?;

        let private_key = self
            .cipher
            .open(&key.key_reference)
            .map_err(|_| SignerError::CouldNotExtractKeyPair)?;

        signer.sign(message, &key.public_key, &private_key)
    }

    async fn generate(
        &self,
        _key_id: &KeyId,
        key_type: &str,
    ) -> Result<StorageGeneratedKey, KeyStorageError> {
        let key_algorithm = self
            .key_algorithm_provider
            .get_key_algorithm(key_type)
            .ok_or_else(|| KeyStorageError::InvalidKeyAlgorithm(key_type.to_owned()))?;

        let key_pair = key_algorithm.generate_key_pair();

        Ok(StorageGeneratedKey {
            public_key: key_pair.public,
            key_reference: self.cipher.seal(&key_pair.private)?,
        })
    }
}

/// Seals private keys into key references; a no-op without passphrase.
struct KeyCipher {
    key: Option<Zeroizing<[u8; 32]>>,
}

impl KeyCipher {
    // TODO: replace the single SHA-256 round with a salted KDF such as pbkdf2
    fn new(passphrase: Option<&str>) -> Self {
        Self {
            key: passphrase.map(|passphrase| Zeroizing::new(Sha256::digest(passphrase).into())),
        }
    }

    fn seal(&self, private_key: &[u8]) -> Result<Vec<u8>, KeyStorageError> {
        let Some(key) = &self.key else {
            return Ok(private_key.to_vec());
        };

        MiniCocoon::from_key(key.as_ref(), &utilities::generate_random_seed_32())
            .wrap(private_key)
            .map_err(|_| KeyStorageError::Failed("Encryption failure".to_owned()))
    }

    fn open(&self, key_reference: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyStorageError> {
        let Some(key) = &self.key else {
            return Ok(Zeroizing::new(key_reference.to_vec()));
        };

        // the seed only matters when sealing
        MiniCocoon::from_key(key.as_ref(), &[0u8; 32])
            .unwrap(key_reference)
            .map(Zeroizing::new)
            .map_err(|_| KeyStorageError::PasswordDecryptionFailure)
    }
}
