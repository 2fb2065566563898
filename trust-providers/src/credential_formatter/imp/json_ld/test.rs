use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::json;

use super::{canonicalize_any, model::LdPresentation, JsonLdFormatter, Params};
use crate::{
    common_models::did::DidValue,
    credential_formatter::{
        error::FormatterError,
        imp::test_utilities::Ed25519Auth,
        model::{ExtractPresentationCtx, FormatPresentationCtx, TokenVerifier},
        CredentialFormatter,
    },
    crypto::SignerError,
};

struct Ed25519Verify {
    public_key: ed25519_compact::PublicKey,
}

#[async_trait]
impl TokenVerifier for Ed25519Verify {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError> {
        assert_eq!(issuer_did_value.unwrap().as_str(), "did:web:host:A");
        assert_eq!(issuer_key_id, Some("did:web:host:A#key-1"));
        assert_eq!(algorithm, "EdDSA");

        let signature = ed25519_compact::Signature::from_slice(signature)
            .map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;
        self.public_key
            .verify(token, &signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}

fn formatter() -> JsonLdFormatter {
    let crypto = trust_crypto::imp::CryptoProviderImpl::new(
        HashMap::from([(
            "sha-256".to_string(),
            Arc::new(trust_crypto::imp::hasher::sha256::Sha256Hasher) as _,
        )]),
        HashMap::new(),
    );

    JsonLdFormatter::new(
        Params {
            leeway: 0,
            presentation_validity: 300,
        },
        Arc::new(crypto),
    )
}

fn credential() -> serde_json::Value {
    json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "type": ["VerifiableCredential", "BpnCredential"],
        "issuer": "did:web:issuer",
        "credentialSubject": { "id": "did:web:host:A", "bpn": "BPNL000000000001" }
    })
}

async fn signed_presentation(auth: Ed25519Auth) -> String {
    formatter()
        .format_presentation(
            &[credential()],
            &DidValue::try_from("did:web:host:A".to_string()).unwrap(),
            "EdDSA",
            Box::new(auth),
            FormatPresentationCtx {
                nonce: Some("nonce-1".to_owned()),
                audience: Some("did:web:host:B".to_owned()),
            },
        )
        .await
        .unwrap()
}

#[test]
fn test_canonicalize_sorts_nested_keys() {
    let value = json!({"b": 1, "a": {"d": [1, {"z": 1, "y": "2"}], "c": "x"}});

    assert_eq!(
        canonicalize_any(&value).unwrap(),
        r#"{"a":{"c":"x","d":[1,{"y":"2","z":1}]},"b":1}"#
    );
}

#[test]
fn test_canonicalize_numbers_in_es6_form() {
    let value = json!({"c": 0.000001, "b": 1e21, "a": 1.0, "d": 333333333.3333333});

    assert_eq!(
        canonicalize_any(&value).unwrap(),
        r#"{"a":1,"b":1e+21,"c":0.000001,"d":333333333.3333333}"#
    );
}

#[test]
fn test_canonicalize_orders_keys_by_utf16() {
    let value = json!({"\u{20ac}": "euro", "\r": "cr", "1": "one", "\u{e9}": "e"});

    assert_eq!(
        canonicalize_any(&value).unwrap(),
        "{\"\\r\":\"cr\",\"1\":\"one\",\"\u{e9}\":\"e\",\"\u{20ac}\":\"euro\"}"
    );
}

#[tokio::test]
async fn test_format_presentation_proof() {
    let auth = Ed25519Auth::generate(Some("did:web:host:A#key-1".to_owned()));
    let token = signed_presentation(auth).await;

    let presentation: LdPresentation = serde_json::from_str(&token).unwrap();
    assert_eq!(presentation.r#type, vec!["VerifiablePresentation"]);
    assert_eq!(presentation.holder.as_str(), "did:web:host:A");
    assert_eq!(presentation.verifiable_credential, vec![credential()]);

    let proof = presentation.proof.unwrap();
    assert_eq!(proof.r#type, "DataIntegrityProof");
    assert_eq!(proof.cryptosuite, "eddsa-jcs-2022");
    assert_eq!(proof.proof_purpose, "authentication");
    assert_eq!(proof.challenge.as_deref(), Some("nonce-1"));
    assert_eq!(proof.domain.as_deref(), Some("did:web:host:B"));
    assert_eq!(proof.context, Some(presentation.context));
    assert!(proof.proof_value.unwrap().starts_with('z'));
}

#[tokio::test]
async fn test_extract_presentation_verifies_proof() {
    let auth = Ed25519Auth::generate(Some("did:web:host:A#key-1".to_owned()));
    let public_key = auth.key_pair.pk;
    let token = signed_presentation(auth).await;

    let presentation = formatter()
        .extract_presentation(
            &token,
            Box::new(Ed25519Verify { public_key }),
            ExtractPresentationCtx {
                nonce: Some("nonce-1".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        presentation.issuer_did,
        Some(DidValue::try_from("did:web:host:A".to_string()).unwrap())
    );
    assert_eq!(presentation.audience.as_deref(), Some("did:web:host:B"));
    assert_eq!(presentation.credentials, vec![credential()]);
    assert!(presentation.issued_at < presentation.expires_at);
}

#[tokio::test]
async fn test_extract_presentation_tampered_credential() {
    let auth = Ed25519Auth::generate(Some("did:web:host:A#key-1".to_owned()));
    let public_key = auth.key_pair.pk;
    let token = signed_presentation(auth).await;

    let mut presentation: serde_json::Value = serde_json::from_str(&token).unwrap();
    presentation["verifiableCredential"][0]["credentialSubject"]["bpn"] =
        json!("BPNL000000000002");

    let result = formatter()
        .extract_presentation(
            &presentation.to_string(),
            Box::new(Ed25519Verify { public_key }),
            Default::default(),
        )
        .await;

    assert!(matches!(result, Err(FormatterError::CouldNotVerify(_))));
}

#[tokio::test]
async fn test_extract_presentation_missing_proof() {
    let document = json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "type": ["VerifiablePresentation"],
        "holder": "did:web:host:A",
        "verifiableCredential": []
    });

    let result = formatter()
        .extract_presentation_unverified(&document.to_string(), Default::default())
        .await;

    assert!(matches!(
        result,
        Err(FormatterError::CouldNotExtractPresentation(_))
    ));
}

#[tokio::test]
async fn test_format_presentation_requires_key_id() {
    let result = formatter()
        .format_presentation(
            &[credential()],
            &DidValue::try_from("did:web:host:A".to_string()).unwrap(),
            "EdDSA",
            Box::new(Ed25519Auth::generate(None)),
            Default::default(),
        )
        .await;

    assert!(matches!(result, Err(FormatterError::CouldNotSign(_))));
}
