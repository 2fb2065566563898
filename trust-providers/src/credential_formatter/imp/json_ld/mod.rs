//! Verifiable presentations as JSON-LD, secured with a `DataIntegrityProof`
//! of the `eddsa-jcs-2022` cryptosuite.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use self::model::{LdPresentation, LdProof};
use crate::{
    common_models::did::DidValue,
    credential_formatter::{
        error::FormatterError,
        model::{
            AuthenticationFn, Context, ExtractPresentationCtx, FormatPresentationCtx, Presentation,
            VerificationFn,
        },
        CredentialFormatter,
    },
    crypto::CryptoProvider,
};

pub mod model;

#[cfg(test)]
mod test;

const CRYPTOSUITE: &str = "eddsa-jcs-2022";
const PROOF_TYPE: &str = "DataIntegrityProof";
const PROOF_PURPOSE: &str = "authentication";
const HASH_ALGORITHM: &str = "sha-256";

pub struct JsonLdFormatter {
    params: Params,
    crypto: Arc<dyn CryptoProvider>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub leeway: u64,
    /// Lifetime of issued presentations, in seconds.
    #[serde(default = "default_presentation_validity")]
    pub presentation_validity: i64,
}

fn default_presentation_validity() -> i64 {
    300
}

impl JsonLdFormatter {
    pub fn new(params: Params, crypto: Arc<dyn CryptoProvider>) -> Self {
        Self { params, crypto }
    }

    /// `sha256(canonical proof config) || sha256(canonical document)`
    fn create_signing_input(
        &self,
        proof_config: &LdProof,
        document: &LdPresentation,
    ) -> Result<Vec<u8>, FormatterError> {
        let hasher = self.crypto.get_hasher(HASH_ALGORITHM)?;

        let proof_hash = hasher.hash(canonicalize_any(proof_config)?.as_bytes())?;
        let document_hash = hasher.hash(canonicalize_any(document)?.as_bytes())?;

        Ok([proof_hash, document_hash].concat())
    }

    async fn parse(
        &self,
        token: &str,
        verification: Option<VerificationFn>,
        context: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError> {
        let mut presentation: LdPresentation = serde_json::from_str(token)
            .map_err(|e| FormatterError::CouldNotExtractPresentation(e.to_string()))?;

        let mut proof = presentation
            .proof
            .take()
            .ok_or(FormatterError::CouldNotExtractPresentation(
                "Missing proof".to_owned(),
            ))?;

        if proof.r#type != PROOF_TYPE || proof.cryptosuite != CRYPTOSUITE {
            return Err(FormatterError::CouldNotExtractPresentation(format!(
                "Unsupported proof: {} {}",
                proof.r#type, proof.cryptosuite
            )));
        }

        if context.nonce.is_some() && context.nonce != proof.challenge {
            return Err(FormatterError::CouldNotExtractPresentation(
                "Nonce mismatch".to_owned(),
            ));
        }

        if let Some(verification) = verification {
            let proof_value = proof.proof_value.take().ok_or(FormatterError::CouldNotVerify(
                "Missing proof value".to_owned(),
            ))?;
            let signature = decode_proof_value(&proof_value)?;

            if proof.context.as_ref() != Some(&presentation.context) {
                return Err(FormatterError::CouldNotVerify(
                    "Proof context does not match document context".to_owned(),
                ));
            }

            let signing_input = self.create_signing_input(&proof, &presentation)?;

            verification
                .verify(
                    Some(presentation.holder.clone()),
                    Some(proof.verification_method.as_str()),
                    "EdDSA",
                    &signing_input,
                    &signature,
                )
                .await
                .map_err(|e| FormatterError::CouldNotVerify(e.to_string()))?;
        }

        Ok(Presentation {
            id: presentation.id,
            issued_at: proof.created,
            expires_at: proof.expires,
            issuer_did: Some(presentation.holder),
            audience: proof.domain,
            nonce: proof.challenge,
            credentials: presentation.verifiable_credential,
        })
    }
}

#[async_trait]
impl CredentialFormatter for JsonLdFormatter {
    async fn format_presentation(
        &self,
        credentials: &[serde_json::Value],
        holder_did: &DidValue,
        _algorithm: &str,
        auth_fn: AuthenticationFn,
        FormatPresentationCtx { nonce, audience }: FormatPresentationCtx,
    ) -> Result<String, FormatterError> {
        let context = vec![
            Context::CredentialsV1.to_string(),
            Context::DataIntegrityV2.to_string(),
        ];

        let mut presentation = LdPresentation {
            context: context.clone(),
            id: Some(format!("urn:uuid:{}", Uuid::new_v4())),
            r#type: vec!["VerifiablePresentation".to_owned()],
            holder: holder_did.to_owned(),
            verifiable_credential: credentials.to_vec(),
            proof: None,
        };

        let now = OffsetDateTime::now_utc();
        let verification_method = auth_fn
            .get_key_id()
            .ok_or(FormatterError::CouldNotSign("Missing key id".to_owned()))?;

        let mut proof = LdProof {
            context: Some(context),
            r#type: PROOF_TYPE.to_owned(),
            created: Some(now),
            expires: now.checked_add(Duration::seconds(self.params.presentation_validity)),
            cryptosuite: CRYPTOSUITE.to_owned(),
            verification_method,
            proof_purpose: PROOF_PURPOSE.to_owned(),
            proof_value: None,
            challenge: nonce,
            domain: audience,
        };

        let signing_input = self.create_signing_input(&proof, &presentation)?;
        let signature = auth_fn
            .sign(&signing_input)
            .await
            .map_err(|e| FormatterError::CouldNotSign(e.to_string()))?;

        proof.proof_value = Some(format!("z{}", bs58::encode(signature).into_string()));
        presentation.proof = Some(proof);

        serde_json::to_string(&presentation)
            .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))
    }

    async fn extract_presentation(
        &self,
        token: &str,
        verification: VerificationFn,
        context: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError> {
        self.parse(token, Some(verification), context).await
    }

    async fn extract_presentation_unverified(
        &self,
        token: &str,
        context: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError> {
        self.parse(token, None, context).await
    }

    fn get_leeway(&self) -> u64 {
        self.params.leeway
    }
}

fn decode_proof_value(proof_value: &str) -> Result<Vec<u8>, FormatterError> {
    let encoded = proof_value
        .strip_prefix('z')
        .ok_or(FormatterError::CouldNotVerify(
            "Proof value is not base58-btc multibase".to_owned(),
        ))?;

    bs58::decode(encoded)
        .into_vec()
        .map_err(|e| FormatterError::CouldNotVerify(e.to_string()))
}

/// RFC 8785 JSON canonicalization.
pub fn canonicalize_any<T: Serialize>(value: &T) -> Result<String, FormatterError> {
    serde_json_canonicalizer::to_string(value)
        .map_err(|e| FormatterError::JsonMapping(e.to_string()))
}
