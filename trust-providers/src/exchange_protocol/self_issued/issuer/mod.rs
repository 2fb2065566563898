//! Issuance of the nested self-issued token.

use std::sync::Arc;

use itertools::Itertools;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{
    error::SelfIssuedTokenError,
    model::{AccessToken, AccessTokenClaims, IssuedToken, SiToken, SiTokenClaims},
    scope::{Scope, ScopeError},
    TOKEN_ALGORITHM, TOKEN_TYPE,
};
use crate::{
    common_models::{did::DidValue, key::KeyHandle},
    credential_formatter::{error::FormatterError, imp::jwt::model::JWTPayload},
    crypto::utilities,
    key_signer::{imp::KeySignatureProvider, KeySigner},
};


pub struct TokenIssuer {
    key_signer: Arc<dyn KeySigner>,
}

impl TokenIssuer {
    pub fn new(key_signer: Arc<dyn KeySigner>) -> Self {
        Self { key_signer }
    }

    /// Issues a self-issued token for `partner` with a fresh access token
    /// granting `scopes`. Both layers carry the same nonce.
    pub async fn issue(
        &self,
        self_did: &DidValue,
        partner: &DidValue,
        key: &KeyHandle,
        scopes: &[Scope],
        validity: Duration,
    ) -> Result<IssuedToken, SelfIssuedTokenError> {
        if scopes.is_empty() {
            return Err(ScopeError::Empty.into());
        }
        if let Some(scope) = scopes.iter().find(|scope| scope.credential_type.is_empty()) {
            return Err(ScopeError::Malformed(scope.to_string()).into());
        }

        let now = now_in_seconds();
        let expires_at = expiry(now, validity)?;
        let nonce = utilities::generate_nonce();

        let access_token = AccessToken::new(
            TOKEN_TYPE.to_owned(),
            TOKEN_ALGORITHM.to_owned(),
            key.verification_method_id.to_owned(),
            JWTPayload {
                issued_at: Some(now),
                expires_at: Some(expires_at),
                invalid_before: None,
                issuer: Some(self_did.to_string()),
                subject: Some(partner.to_string()),
                audience: Some(partner.to_string()),
                jwt_id: Some(Uuid::new_v4().to_string()),
                nonce: Some(nonce.to_owned()),
                custom: AccessTokenClaims {
                    scope: Some(scopes.iter().join(" ")),
                },
            },
        );

        let access_token = access_token
            .tokenize(KeySignatureProvider::new_auth_fn(
                self.key_signer.clone(),
                key.to_owned(),
            ))
            .await
            .map_err(signing_failure)?;

        self.wrap(self_did, partner, key, access_token, nonce, now, expires_at)
            .await
    }

    /// Wraps an access token obtained elsewhere, reusing its nonce.
    pub async fn issue_with_access_token(
        &self,
        self_did: &DidValue,
        partner: &DidValue,
        key: &KeyHandle,
        access_token: &str,
        validity: Duration,
    ) -> Result<IssuedToken, SelfIssuedTokenError> {
        let decomposed = AccessToken::decompose_token(access_token)
            .map_err(|e| SelfIssuedTokenError::MalformedToken(e.to_string()))?;

        let nonce = decomposed.payload.nonce.ok_or_else(|| {
            SelfIssuedTokenError::MalformedToken("Access token without nonce".to_owned())
        })?;

        let now = now_in_seconds();
        let expires_at = expiry(now, validity)?;

        self.wrap(
            self_did,
            partner,
            key,
            access_token.to_owned(),
            nonce,
            now,
            expires_at,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn wrap(
        &self,
        self_did: &DidValue,
        partner: &DidValue,
        key: &KeyHandle,
        access_token: String,
        nonce: String,
        now: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<IssuedToken, SelfIssuedTokenError> {
        let jti = Uuid::new_v4().to_string();

        let token = SiToken::new(
            TOKEN_TYPE.to_owned(),
            TOKEN_ALGORITHM.to_owned(),
            key.verification_method_id.to_owned(),
            JWTPayload {
                issued_at: Some(now),
                expires_at: Some(expires_at),
                invalid_before: None,
                issuer: Some(self_did.to_string()),
                subject: Some(self_did.to_string()),
                audience: Some(partner.to_string()),
                jwt_id: Some(jti.to_owned()),
                nonce: Some(nonce.to_owned()),
                custom: SiTokenClaims {
                    access_token: Some(access_token.to_owned()),
                },
            },
        )
        .tokenize(KeySignatureProvider::new_auth_fn(
            self.key_signer.clone(),
            key.to_owned(),
        ))
        .await
        .map_err(signing_failure)?;

        tracing::debug!(%jti, audience = %partner, "issued self-issued token");

        Ok(IssuedToken {
            token,
            access_token,
            jti,
            nonce,
            expires_at,
        })
    }
}

/// Current time truncated to the resolution of the `iat`/`exp` claims.
fn now_in_seconds() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(now.nanosecond().into())
}

fn expiry(
    now: OffsetDateTime,
    validity: Duration,
) -> Result<OffsetDateTime, SelfIssuedTokenError> {
    if validity.is_negative() {
        return Err(SelfIssuedTokenError::InvalidValidity(validity));
    }

    now.checked_add(validity)
        .ok_or(SelfIssuedTokenError::InvalidValidity(validity))
}

fn signing_failure(error: FormatterError) -> SelfIssuedTokenError {
    SelfIssuedTokenError::SigningFailure(error.to_string())
}
