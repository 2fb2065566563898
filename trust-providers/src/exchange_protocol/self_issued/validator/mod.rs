//! Validation of the nested self-issued token.
//!
//! Every check runs regardless of earlier failures and the rejection reasons
//! are collected into a [`ValidationResult`]. Only a token that cannot be
//! parsed at all aborts validation.

use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use super::{
    error::{SelfIssuedTokenError, TokenValidationError},
    model::{AccessToken, SiToken},
};
use crate::{
    common_models::did::DidValue,
    credential_formatter::imp::jwt::model::{DecomposedToken, JWTPayload},
    key_signer::KeySigner,
    storage::wallet::WalletStorage,
};


#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Clock skew tolerance in seconds for `iat` and `exp`.
    #[serde(default)]
    pub leeway: u64,
}

/// Outcome of a validation run. Valid exactly when no error was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<TokenValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded errors in check order, each reported once.
    pub fn errors(&self) -> &[TokenValidationError] {
        &self.errors
    }

    pub fn contains(&self, error: TokenValidationError) -> bool {
        self.errors.contains(&error)
    }

    pub fn error_message(&self) -> String {
        self.errors.iter().join(", ")
    }

    fn push(&mut self, error: TokenValidationError) {
        if !self.errors.contains(&error) {
            tracing::debug!(%error, "self-issued token check failed");
            self.errors.push(error);
        }
    }
}

/// Validation outcome together with the parsed outer token.
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub result: ValidationResult,
    pub token: SiToken,
}

pub struct TokenValidator {
    key_signer: Arc<dyn KeySigner>,
    wallet_storage: Arc<dyn WalletStorage>,
    params: Params,
}

impl TokenValidator {
    pub fn new(
        key_signer: Arc<dyn KeySigner>,
        wallet_storage: Arc<dyn WalletStorage>,
        params: Params,
    ) -> Self {
        Self {
            key_signer,
            wallet_storage,
            params,
        }
    }

    pub async fn validate(&self, token: &str) -> Result<ValidationResult, SelfIssuedTokenError> {
        self.validate_at(token, OffsetDateTime::now_utc()).await
    }

    pub async fn validate_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<ValidationResult, SelfIssuedTokenError> {
        self.validate_token_at(token, now)
            .await
            .map(|validated| validated.result)
    }

    /// Runs all checks against `now` and hands back the parsed outer token.
    pub async fn validate_token_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<ValidatedToken, SelfIssuedTokenError> {
        let outer = SiToken::decompose_token(token)
            .map_err(|e| SelfIssuedTokenError::MalformedToken(e.to_string()))?;

        let mut result = ValidationResult::default();

        self.check_signature(&outer, &mut result).await;

        let claims = &outer.payload;
        if claims.issuer != claims.subject {
            result.push(TokenValidationError::IssAndSubNotEqual);
        }

        self.check_subject(claims, &mut result).await?;
        self.check_validity_period(claims, now, &mut result);

        if let Some(access_token) = &claims.custom.access_token {
            let inner = AccessToken::decompose_token(access_token)
                .map_err(|e| SelfIssuedTokenError::MalformedToken(e.to_string()))?;

            self.check_signature(&inner, &mut result).await;
            check_audience(claims, &inner.payload, &mut result);
            check_nonce(claims, &inner.payload, &mut result);
            self.check_validity_period(&inner.payload, now, &mut result);
        } else {
            result.push(TokenValidationError::AccessTokenMissing);
        }

        Ok(ValidatedToken {
            result,
            token: SiToken {
                header: outer.header,
                payload: outer.payload,
            },
        })
    }

    /// Verifies the token against a key of its `iss` DID document.
    async fn check_signature<T>(&self, token: &DecomposedToken<T>, result: &mut ValidationResult) {
        let Some(issuer) = token
            .payload
            .issuer
            .as_deref()
            .and_then(|issuer| issuer.parse::<DidValue>().ok())
        else {
            result.push(TokenValidationError::SignatureNotVerified);
            return;
        };

        let verified = self
            .key_signer
            .verify(
                &issuer,
                token.header.key_id.as_deref(),
                &token.header.algorithm,
                token.unverified_jwt.as_bytes(),
                &token.signature,
            )
            .await;

        match verified {
            Ok(true) => {}
            Ok(false) => result.push(TokenValidationError::SignatureNotVerified),
            Err(error) => {
                tracing::debug!(%error, %issuer, "signature could not be checked");
                result.push(TokenValidationError::SignatureNotVerified);
            }
        }
    }

    async fn check_subject<T>(
        &self,
        claims: &JWTPayload<T>,
        result: &mut ValidationResult,
    ) -> Result<(), SelfIssuedTokenError> {
        let Some(subject) = claims
            .subject
            .as_deref()
            .and_then(|subject| subject.parse::<DidValue>().ok())
        else {
            result.push(TokenValidationError::SubNotDid);
            return Ok(());
        };

        if self.wallet_storage.get_by_did(&subject).await?.is_none() {
            result.push(TokenValidationError::SubNotMatchAnyDid);
        }

        Ok(())
    }

    fn check_validity_period<T>(
        &self,
        claims: &JWTPayload<T>,
        now: OffsetDateTime,
        result: &mut ValidationResult,
    ) {
        let leeway = Duration::seconds(self.params.leeway.try_into().unwrap_or(i64::MAX));

        match claims.expires_at {
            None => result.push(TokenValidationError::ExpMissing),
            Some(expires_at) if now > expires_at.saturating_add(leeway) => {
                result.push(TokenValidationError::TokenAlreadyExpired)
            }
            Some(_) => {}
        }

        if let (Some(issued_at), Some(expires_at)) = (claims.issued_at, claims.expires_at) {
            if issued_at > expires_at {
                result.push(TokenValidationError::IatAfterExpiration);
            }
        }

        match claims.issued_at {
            None => result.push(TokenValidationError::IatMissing),
            Some(issued_at) if now < issued_at.saturating_sub(leeway) => {
                result.push(TokenValidationError::CurrentTimeBeforeIat)
            }
            Some(_) => {}
        }
    }
}

fn check_audience<A, B>(outer: &JWTPayload<A>, inner: &JWTPayload<B>, result: &mut ValidationResult) {
    let (Some(outer), Some(inner)) = (outer.audience.as_deref(), inner.audience.as_deref()) else {
        result.push(TokenValidationError::AudMissing);
        return;
    };

    if !DidValue::is_did(outer) || !DidValue::is_did(inner) {
        result.push(TokenValidationError::AudNotDid);
    } else if outer != inner {
        result.push(TokenValidationError::AudClaimsNotEqual);
    }
}

fn check_nonce<A, B>(outer: &JWTPayload<A>, inner: &JWTPayload<B>, result: &mut ValidationResult) {
    match (outer.nonce.as_deref(), inner.nonce.as_deref()) {
        (Some(outer), Some(inner)) if outer == inner => {}
        (Some(_), Some(_)) => result.push(TokenValidationError::NonceClaimsNotEqual),
        _ => result.push(TokenValidationError::NonceMissing),
    }
}
