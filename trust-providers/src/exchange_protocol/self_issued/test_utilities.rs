//! Token fixtures shared by the self-issued exchange tests.

use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    model::{AccessToken, AccessTokenClaims, SiToken, SiTokenClaims},
    TOKEN_ALGORITHM, TOKEN_TYPE,
};
use crate::{
    common_models::{did::DidValue, key::KeyHandle, wallet::Wallet},
    credential_formatter::imp::{jwt::model::JWTPayload, test_utilities::MockAuth},
    key_signer::MockKeySigner,
};

pub const REQUESTER: &str = "did:web:host:A";
pub const PARTNER: &str = "did:web:host:B";
pub const OTHER_PARTNER: &str = "did:web:host:C";
pub const NONCE: &str = "n1";
pub const NAMESPACE: &str = "org.eclipse.tractusx.vc.type";

pub fn did(value: &str) -> DidValue {
    value.parse().unwrap()
}

pub fn key_handle(did_value: &str) -> KeyHandle {
    KeyHandle {
        id: Uuid::new_v4().into(),
        wallet_did: did(did_value),
        verification_method_id: Some(format!("{did_value}#key-1")),
        public_key: vec![1; 32],
        key_reference: vec![2; 32],
        storage_type: "INTERNAL".to_owned(),
        key_type: "EDDSA".to_owned(),
    }
}

pub fn wallet(did_value: &str) -> Wallet {
    Wallet {
        did: did(did_value),
        bpn: "BPNL000000000000".to_owned(),
        name: did_value.to_owned(),
        key: key_handle(did_value),
    }
}

pub fn timestamp(seconds: i64) -> Option<OffsetDateTime> {
    Some(OffsetDateTime::from_unix_timestamp(seconds).unwrap())
}

/// Registered claims of one token layer.
#[derive(Clone, Default)]
pub struct Claims {
    pub iss: Option<&'static str>,
    pub sub: Option<&'static str>,
    pub aud: Option<&'static str>,
    pub nonce: Option<&'static str>,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
}

impl Claims {
    pub fn requester(aud: &'static str, iat: i64, exp: i64) -> Self {
        Self {
            iss: Some(REQUESTER),
            sub: Some(REQUESTER),
            aud: Some(aud),
            nonce: Some(NONCE),
            iat: Some(iat),
            exp: Some(exp),
        }
    }

    fn into_payload<T>(self, custom: T) -> JWTPayload<T> {
        JWTPayload {
            issued_at: self.iat.and_then(timestamp),
            expires_at: self.exp.and_then(timestamp),
            invalid_before: None,
            issuer: self.iss.map(str::to_owned),
            subject: self.sub.map(str::to_owned),
            audience: self.aud.map(str::to_owned),
            jwt_id: Some(Uuid::new_v4().to_string()),
            nonce: self.nonce.map(str::to_owned),
            custom,
        }
    }
}

fn mock_auth() -> MockAuth<impl Fn(&[u8]) -> Vec<u8> + Send + Sync> {
    MockAuth(|_: &[u8]| vec![1, 2, 3])
}

pub async fn access_token(claims: Claims, scope: Option<&str>) -> String {
    let payload = claims.into_payload(AccessTokenClaims {
        scope: scope.map(str::to_owned),
    });

    AccessToken::new(
        TOKEN_TYPE.to_owned(),
        TOKEN_ALGORITHM.to_owned(),
        Some(format!("{REQUESTER}#key-1")),
        payload,
    )
    .tokenize(Box::new(mock_auth()))
    .await
    .unwrap()
}

pub async fn si_token(claims: Claims, access_token: Option<String>) -> String {
    let payload = claims.into_payload(SiTokenClaims { access_token });

    SiToken::new(
        TOKEN_TYPE.to_owned(),
        TOKEN_ALGORITHM.to_owned(),
        Some(format!("{REQUESTER}#key-1")),
        payload,
    )
    .tokenize(Box::new(mock_auth()))
    .await
    .unwrap()
}

/// A key signer accepting every signature.
pub fn accepting_key_signer() -> MockKeySigner {
    let mut key_signer = MockKeySigner::new();
    key_signer
        .expect_verify()
        .returning(|_, _, _, _, _| Ok(true));
    key_signer
}
