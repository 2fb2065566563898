use ed25519_compact::{KeyPair, PublicKey, Signature};

use crate::{Signer, SignerError};

pub struct Ed25519Signer;

impl Signer for Ed25519Signer {
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignerError> {
        let key_pair =
            KeyPair::from_slice(private_key).map_err(|_| SignerError::CouldNotExtractKeyPair)?;

        if key_pair.pk.as_slice() != public_key {
            return Err(SignerError::CouldNotExtractKeyPair);
        }

        // deterministic signatures, no noise
        Ok(key_pair.sk.sign(input, None).to_vec())
    }

    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), SignerError> {
        let public_key = PublicKey::from_slice(public_key)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;
        let signature =
            Signature::from_slice(signature).map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;

        public_key
            .verify(input, &signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}
