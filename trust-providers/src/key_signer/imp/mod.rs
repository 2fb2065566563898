use std::sync::Arc;

use async_trait::async_trait;

use super::{error::KeySignerError, KeySigner};
use crate::{
    common_models::{did::DidValue, key::KeyHandle},
    credential_formatter::model::{
        AuthenticationFn, SignatureProvider, TokenVerifier, VerificationFn,
    },
    crypto::SignerError,
    key_storage::provider::KeyProvider,
};


pub struct KeySignerImpl {
    key_provider: Arc<dyn KeyProvider>,
    verification: VerificationFn,
}

impl KeySignerImpl {
    pub fn new(key_provider: Arc<dyn KeyProvider>, verification: VerificationFn) -> Self {
        Self {
            key_provider,
            verification,
        }
    }
}

#[async_trait]
impl KeySigner for KeySignerImpl {
    async fn sign(&self, key: &KeyHandle, message: &[u8]) -> Result<Vec<u8>, KeySignerError> {
        let storage = self
            .key_provider
            .get_key_storage(&key.storage_type)
            .ok_or_else(|| KeySignerError::InvalidKeyStorage(key.storage_type.to_owned()))?;

        storage
            .sign(key, message)
            .await
            .map_err(KeySignerError::CouldNotSign)
    }

    async fn verify<'a>(
        &self,
        did: &DidValue,
        key_id: Option<&'a str>,
        algorithm: &'a str,
        message: &'a [u8],
        signature: &'a [u8],
    ) -> Result<bool, KeySignerError> {
        match self
            .verification
            .verify(Some(did.to_owned()), key_id, algorithm, message, signature)
            .await
        {
            Ok(()) => Ok(true),
            Err(SignerError::InvalidSignature) => Ok(false),
            Err(error) => Err(KeySignerError::CouldNotVerify(error)),
        }
    }
}

/// Signs formatter output with one wallet key through a [`KeySigner`].
pub struct KeySignatureProvider {
    signer: Arc<dyn KeySigner>,
    key: KeyHandle,
}

impl KeySignatureProvider {
    pub fn new_auth_fn(signer: Arc<dyn KeySigner>, key: KeyHandle) -> AuthenticationFn {
        Box::new(Self { signer, key })
    }
}

#[async_trait]
impl SignatureProvider for KeySignatureProvider {
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.signer
            .sign(&self.key, message)
            .await
            .map_err(|e| SignerError::CouldNotSign(e.to_string()))
    }

    fn get_key_id(&self) -> Option<String> {
        self.key.verification_method_id.to_owned()
    }
}

/// Verifies formatter input through a [`KeySigner`].
pub struct KeySignerVerification {
    signer: Arc<dyn KeySigner>,
}

impl KeySignerVerification {
    pub fn new_verification_fn(signer: Arc<dyn KeySigner>) -> VerificationFn {
        Box::new(Self { signer })
    }
}

#[async_trait]
impl TokenVerifier for KeySignerVerification {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError> {
        let issuer =
            issuer_did_value.ok_or(SignerError::CouldNotVerify("Missing issuer".to_string()))?;

        let verified = self
            .signer
            .verify(&issuer, issuer_key_id, algorithm, token, signature)
            .await
            .map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;

        if verified {
            Ok(())
        } else {
            Err(SignerError::InvalidSignature)
        }
    }
}
