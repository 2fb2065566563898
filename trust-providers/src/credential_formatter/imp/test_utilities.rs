//! Signing helpers for formatter tests.

use async_trait::async_trait;

use crate::{credential_formatter::model::SignatureProvider, crypto::SignerError};

/// Signs with a closure; reports `#key0` as key id.
#[derive(Clone)]
pub struct MockAuth<F: Fn(&[u8]) -> Vec<u8> + Send + Sync>(pub F);

#[async_trait]
impl<F: Fn(&[u8]) -> Vec<u8> + Send + Sync> SignatureProvider for MockAuth<F> {
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.0(message))
    }

    fn get_key_id(&self) -> Option<String> {
        Some("#key0".to_owned())
    }
}

/// Signs with an in-memory Ed25519 key pair.
pub struct Ed25519Auth {
    pub key_pair: ed25519_compact::KeyPair,
    pub key_id: Option<String>,
}

impl Ed25519Auth {
    pub fn generate(key_id: Option<String>) -> Self {
        Self {
            key_pair: ed25519_compact::KeyPair::generate(),
            key_id,
        }
    }
}

#[async_trait]
impl SignatureProvider for Ed25519Auth {
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.key_pair.sk.sign(message, None).to_vec())
    }

    fn get_key_id(&self) -> Option<String> {
        self.key_id.to_owned()
    }
}
