use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use serde_json::json;
use time::Duration;

use super::{JWTFormatter, Params};
use crate::{
    common_models::did::DidValue,
    credential_formatter::{
        error::FormatterError,
        imp::{jwt::model::JWTPayload, jwt_formatter::model::VP, test_utilities::MockAuth},
        model::{ExtractPresentationCtx, FormatPresentationCtx, MockTokenVerifier},
        CredentialFormatter,
    },
    crypto::SignerError,
};

fn formatter() -> JWTFormatter {
    JWTFormatter::new(Params {
        leeway: 45,
        presentation_validity: 300,
    })
}

fn credential() -> serde_json::Value {
    json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "id": "urn:uuid:7a1c1e0c-7a3a-4d5e-8f3c-0d4f6f0c9b11",
        "type": ["VerifiableCredential", "MembershipCredential"],
        "issuer": "did:web:issuer",
        "credentialSubject": { "id": "did:web:host:A", "holderIdentifier": "BPNL000000000001" }
    })
}

fn decode_payload(token: &str) -> JWTPayload<VP> {
    let parts: Vec<&str> = token.split('.').collect();
    serde_json::from_slice(&Base64UrlSafeNoPadding::decode_to_vec(parts[1], None).unwrap())
        .unwrap()
}

async fn format(ctx: FormatPresentationCtx) -> String {
    formatter()
        .format_presentation(
            &[credential()],
            &DidValue::try_from("did:web:host:A".to_string()).unwrap(),
            "EdDSA",
            Box::new(MockAuth(|_: &[u8]| vec![65u8, 66, 67])),
            ctx,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_format_presentation() {
    let token = format(FormatPresentationCtx {
        nonce: Some("nonce-1".to_owned()),
        audience: Some("did:web:host:B".to_owned()),
    })
    .await;

    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(
        parts[0],
        Base64UrlSafeNoPadding::encode_to_string(r##"{"alg":"EdDSA","kid":"#key0","typ":"JWT"}"##)
            .unwrap()
    );
    assert_eq!(parts[2], "QUJD");

    let payload = decode_payload(&token);
    assert_eq!(
        payload.expires_at,
        Some(payload.issued_at.unwrap() + Duration::minutes(5)),
    );
    assert_eq!(
        payload.invalid_before,
        Some(payload.issued_at.unwrap() - Duration::seconds(45)),
    );
    assert_eq!(payload.issuer.as_deref(), Some("did:web:host:A"));
    assert_eq!(payload.subject.as_deref(), Some("did:web:host:A"));
    assert_eq!(payload.audience.as_deref(), Some("did:web:host:B"));
    assert_eq!(payload.nonce.as_deref(), Some("nonce-1"));

    let vp = payload.custom.vp;
    assert_eq!(vp.r#type, vec!["VerifiablePresentation"]);
    assert_eq!(vp.holder, "did:web:host:A");
    assert_eq!(vp.verifiable_credential, vec![credential()]);
}

#[tokio::test]
async fn test_extract_presentation() {
    let token = format(FormatPresentationCtx {
        nonce: Some("nonce-1".to_owned()),
        audience: Some("did:web:host:B".to_owned()),
    })
    .await;
    let signing_input = token.rsplit_once('.').unwrap().0.to_owned();

    let mut verify_mock = MockTokenVerifier::new();
    verify_mock
        .expect_verify()
        .withf(move |issuer_did_value, key_id, algorithm, token, signature| {
            issuer_did_value.as_ref().map(|did| did.as_str()) == Some("did:web:host:A")
                && *key_id == Some("#key0")
                && algorithm == "EdDSA"
                && token == signing_input.as_bytes()
                && signature == b"ABC"
        })
        .return_once(|_, _, _, _, _| Ok(()));

    let presentation = formatter()
        .extract_presentation(
            &token,
            Box::new(verify_mock),
            ExtractPresentationCtx {
                nonce: Some("nonce-1".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        presentation.issuer_did,
        Some(DidValue::try_from("did:web:host:A".to_owned()).unwrap())
    );
    assert_eq!(presentation.audience.as_deref(), Some("did:web:host:B"));
    assert_eq!(presentation.credentials, vec![credential()]);
}

#[tokio::test]
async fn test_extract_presentation_invalid_signature() {
    let token = format(FormatPresentationCtx::default()).await;

    let mut verify_mock = MockTokenVerifier::new();
    verify_mock
        .expect_verify()
        .return_once(|_, _, _, _, _| Err(SignerError::InvalidSignature));

    let result = formatter()
        .extract_presentation(&token, Box::new(verify_mock), Default::default())
        .await;

    assert!(matches!(result, Err(FormatterError::CouldNotVerify(_))));
}

#[tokio::test]
async fn test_extract_presentation_nonce_mismatch() {
    let token = format(FormatPresentationCtx {
        nonce: Some("nonce-1".to_owned()),
        audience: None,
    })
    .await;

    let result = formatter()
        .extract_presentation_unverified(
            &token,
            ExtractPresentationCtx {
                nonce: Some("nonce-2".to_owned()),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(FormatterError::CouldNotExtractPresentation(_))
    ));
}

#[tokio::test]
async fn test_extract_presentation_with_single_valued_fields() {
    let payload = json!({
        "iss": "did:web:host:A",
        "sub": "did:web:host:A",
        "iat": 1_700_000_000,
        "exp": 1_893_456_000,
        "vp": {
            "@context": "https://www.w3.org/2018/credentials/v1",
            "type": "VerifiablePresentation",
            "holder": "did:web:host:A",
            "verifiableCredential": credential(),
        }
    });
    let token = format!(
        "{}.{}.QUJD",
        Base64UrlSafeNoPadding::encode_to_string(r#"{"alg":"EdDSA","typ":"JWT"}"#).unwrap(),
        Base64UrlSafeNoPadding::encode_to_string(payload.to_string()).unwrap(),
    );

    let presentation = formatter()
        .extract_presentation_unverified(&token, Default::default())
        .await
        .unwrap();

    assert_eq!(presentation.credentials, vec![credential()]);
    assert_eq!(
        presentation.expires_at.map(|exp| exp.unix_timestamp()),
        Some(1_893_456_000)
    );
}

#[tokio::test]
async fn test_extract_presentation_holder_mismatch() {
    let payload = json!({
        "iss": "did:web:host:B",
        "iat": 1_700_000_000,
        "exp": 1_893_456_000,
        "vp": {
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiablePresentation"],
            "holder": "did:web:host:A",
            "verifiableCredential": [credential()],
        }
    });
    let token = format!(
        "{}.{}.QUJD",
        Base64UrlSafeNoPadding::encode_to_string(r#"{"alg":"EdDSA","typ":"JWT"}"#).unwrap(),
        Base64UrlSafeNoPadding::encode_to_string(payload.to_string()).unwrap(),
    );

    let result = formatter()
        .extract_presentation_unverified(&token, Default::default())
        .await;

    assert!(matches!(
        result,
        Err(FormatterError::CouldNotExtractPresentation(_))
    ));
}
