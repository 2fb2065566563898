//! Signature verification against DID-resolved keys.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    common_models::{
        did::{DidValue, KeyRole},
        PublicKeyJwk,
    },
    credential_formatter::model::TokenVerifier,
    crypto::SignerError,
    did::{model::DidDocument, provider::DidMethodProvider},
    key_algorithm::provider::KeyAlgorithmProvider,
};

/// Verifies signatures with a key listed under `key_role` in the signer's DID document.
#[derive(Clone)]
pub struct KeyVerification {
    pub did_method_provider: Arc<dyn DidMethodProvider>,
    pub key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    pub key_role: KeyRole,
}

impl KeyVerification {
    async fn resolve(&self, did: &DidValue) -> Result<DidDocument, SignerError> {
        self.did_method_provider
            .resolve(did)
            .await
            .map_err(|error| {
                if error.is_not_found() {
                    SignerError::CouldNotVerify(format!("Unknown signer `{did}`"))
                } else {
                    SignerError::CouldNotVerify(error.to_string())
                }
            })
    }
}

#[async_trait]
impl TokenVerifier for KeyVerification {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError> {
        let signer_did =
            issuer_did_value.ok_or(SignerError::CouldNotVerify("Missing issuer".to_owned()))?;

        let document = self.resolve(&signer_did).await?;

        let public_key_jwk = find_role_key(&document, &signer_did, self.key_role, issuer_key_id)?;

        let (algorithm_name, key_algorithm) = self
            .key_algorithm_provider
            .get_key_algorithm_from_jose_alg(algorithm)
            .ok_or_else(|| SignerError::CouldNotVerify(format!("Invalid algorithm: {algorithm}")))?;

        let public_key = key_algorithm
            .jwk_to_bytes(public_key_jwk)
            .map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;

        self.key_algorithm_provider
            .get_signer(&algorithm_name)
            .map_err(|e| SignerError::CouldNotVerify(e.to_string()))?
            .verify(token, signature, &public_key)
    }
}

/// Picks the verification method named by `key_id`, or the first one of the
/// role when absent. A method outside the role is never used.
fn find_role_key<'d>(
    document: &'d DidDocument,
    did: &DidValue,
    role: KeyRole,
    key_id: Option<&str>,
) -> Result<&'d PublicKeyJwk, SignerError> {
    let role_methods = match role {
        KeyRole::Authentication => document.authentication.as_deref(),
        KeyRole::AssertionMethod => document.assertion_method.as_deref(),
    }
    .unwrap_or_default();

    let method_id = match key_id {
        // relative reference into the signer's document
        Some(fragment) if fragment.starts_with('#') => format!("{did}{fragment}"),
        Some(key_id) => key_id.to_owned(),
        None => role_methods.first().ok_or(SignerError::MissingKey)?.to_owned(),
    };

    if !role_methods.contains(&method_id) {
        return Err(SignerError::MissingKey);
    }

    document
        .verification_method
        .iter()
        .find(|method| method.id == method_id)
        .map(|method| &method.public_key_jwk)
        .ok_or(SignerError::MissingKey)
}
