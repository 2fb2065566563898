//! Compact JWS encoding shared by the token and presentation formats.

use std::fmt::Debug;

use async_trait::async_trait;
use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use serde::{de::DeserializeOwned, Serialize};

use self::model::{DecomposedToken, JWTHeader, JWTPayload};
use crate::{
    common_models::did::DidValue,
    credential_formatter::{
        error::FormatterError,
        model::{AuthenticationFn, TokenVerifier},
    },
    crypto::SignerError,
};


pub mod model;

#[async_trait]
impl TokenVerifier for Box<dyn TokenVerifier> {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError> {
        self.as_ref()
            .verify(issuer_did_value, issuer_key_id, algorithm, token, signature)
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jwt<Payload: Serialize + DeserializeOwned + Debug> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        signature_type: String,
        algorithm: String,
        key_id: Option<String>,
        payload: JWTPayload<Payload>,
    ) -> Jwt<Payload> {
        let header = JWTHeader {
            signature_type: Some(signature_type),
            algorithm,
            key_id,
        };

        Jwt { header, payload }
    }

    /// Parses the token and, when `verification` is given, checks its signature
    /// against the key of the `iss` claim.
    pub async fn build_from_token(
        token: &str,
        verification: Option<Box<dyn TokenVerifier>>,
    ) -> Result<Jwt<Payload>, FormatterError> {
        let DecomposedToken {
            header,
            payload,
            unverified_jwt,
            signature,
        } = Jwt::decompose_token(token)?;

        if let Some(verification) = verification {
            verification
                .verify(
                    payload.issuer.as_deref().and_then(|v| v.parse().ok()),
                    header.key_id.as_deref(),
                    &header.algorithm,
                    unverified_jwt.as_bytes(),
                    &signature,
                )
                .await
                .map_err(|e| FormatterError::CouldNotVerify(e.to_string()))?;
        }

        Ok(Jwt { header, payload })
    }

    /// Serializes and signs; a signing failure yields no token at all.
    pub async fn tokenize(&self, auth_fn: AuthenticationFn) -> Result<String, FormatterError> {
        let mut token = format!(
            "{}.{}",
            encode_segment(&self.header)?,
            encode_segment(&self.payload)?,
        );

        let signature = auth_fn
            .sign(token.as_bytes())
            .await
            .map_err(|e| FormatterError::CouldNotSign(e.to_string()))?;

        if signature.is_empty() {
            return Err(FormatterError::CouldNotSign("Empty signature".to_owned()));
        }

        token.push('.');
        token.push_str(&encode_b64url(&signature)?);

        Ok(token)
    }

    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, FormatterError> {
        let token = token.trim();
        let mut jwt_parts = token.split('.');

        let (Some(header), Some(payload), Some(signature), None) = (
            jwt_parts.next(),
            jwt_parts.next(),
            jwt_parts.next(),
            jwt_parts.next(),
        ) else {
            return Err(FormatterError::CouldNotExtractToken(
                "Expected three token parts".to_owned(),
            ));
        };

        Ok(DecomposedToken {
            header: decode_segment(header)?,
            payload: decode_segment(payload)?,
            unverified_jwt: format!("{header}.{payload}"),
            signature: decode_b64url(signature)?,
        })
    }
}

fn encode_b64url(bytes: &[u8]) -> Result<String, FormatterError> {
    Base64UrlSafeNoPadding::encode_to_string(bytes)
        .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, FormatterError> {
    let json =
        serde_json::to_vec(value).map_err(|e| FormatterError::CouldNotFormat(e.to_string()))?;
    encode_b64url(&json)
}

fn decode_b64url(segment: &str) -> Result<Vec<u8>, FormatterError> {
    Base64UrlSafeNoPadding::decode_to_vec(segment, None)
        .map_err(|e| FormatterError::CouldNotExtractToken(e.to_string()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, FormatterError> {
    serde_json::from_slice(&decode_b64url(segment)?)
        .map_err(|e| FormatterError::CouldNotExtractToken(e.to_string()))
}
