//! Issuing self-issued tokens for hosted wallets and checking received ones.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use trust_providers::{
    common_models::{did::DidValue, wallet::Wallet},
    credential_formatter::imp::jwt::model::JWTPayload,
    exchange_protocol::self_issued::{
        error::SelfIssuedTokenError,
        issuer::TokenIssuer,
        model::{IssuedToken, SiTokenClaims},
        scope::{Scope, ScopeOperation},
        validator::{TokenValidator, ValidationResult},
    },
    storage::wallet::WalletStorage,
};

use super::error::TokenServiceError;

const BEARER_PREFIX: &str = "Bearer ";

pub struct TokenService {
    issuer: TokenIssuer,
    validator: Arc<TokenValidator>,
    wallet_storage: Arc<dyn WalletStorage>,
    scope_namespace: String,
    validity: Duration,
}

impl TokenService {
    pub fn new(
        issuer: TokenIssuer,
        validator: Arc<TokenValidator>,
        wallet_storage: Arc<dyn WalletStorage>,
        scope_namespace: String,
        validity: Duration,
    ) -> Self {
        Self {
            issuer,
            validator,
            wallet_storage,
            scope_namespace,
            validity,
        }
    }

    /// Issues a token of the `requester` wallet for `partner` granting `scopes`.
    pub async fn issue(
        &self,
        requester: &DidValue,
        partner: &DidValue,
        scopes: &[Scope],
    ) -> Result<IssuedToken, TokenServiceError> {
        let wallet = self.get_wallet(requester).await?;

        Ok(self
            .issuer
            .issue(&wallet.did, partner, &wallet.key, scopes, self.validity)
            .await?)
    }

    /// Issues a token granting read access to `credential_types`.
    pub async fn issue_read_token(
        &self,
        requester: &DidValue,
        partner: &DidValue,
        credential_types: &[&str],
    ) -> Result<IssuedToken, TokenServiceError> {
        let scopes: Vec<Scope> = credential_types
            .iter()
            .map(|credential_type| {
                Scope::new(
                    self.scope_namespace.to_owned(),
                    *credential_type,
                    ScopeOperation::Read,
                )
            })
            .collect();

        self.issue(requester, partner, &scopes).await
    }

    /// Re-wraps an access token obtained elsewhere for `partner`.
    pub async fn issue_with_access_token(
        &self,
        requester: &DidValue,
        partner: &DidValue,
        access_token: &str,
    ) -> Result<IssuedToken, TokenServiceError> {
        let wallet = self.get_wallet(requester).await?;

        Ok(self
            .issuer
            .issue_with_access_token(&wallet.did, partner, &wallet.key, access_token, self.validity)
            .await?)
    }

    pub async fn validate(&self, token: &str) -> Result<ValidationResult, TokenServiceError> {
        Ok(self.validator.validate(token).await?)
    }

    /// Checks an `Authorization` header value and returns the outer claims of
    /// a valid token. A rejection names every validation error.
    pub async fn authorize(
        &self,
        header: &str,
    ) -> Result<JWTPayload<SiTokenClaims>, TokenServiceError> {
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| TokenServiceError::Unauthorized("Missing bearer token".to_owned()))?;

        let validated = match self
            .validator
            .validate_token_at(token, OffsetDateTime::now_utc())
            .await
        {
            Ok(validated) => validated,
            Err(SelfIssuedTokenError::MalformedToken(reason)) => {
                return Err(TokenServiceError::Unauthorized(reason))
            }
            Err(error) => return Err(error.into()),
        };

        if !validated.result.is_valid() {
            return Err(TokenServiceError::Unauthorized(
                validated.result.error_message(),
            ));
        }

        Ok(validated.token.payload)
    }

    async fn get_wallet(&self, did: &DidValue) -> Result<Wallet, TokenServiceError> {
        self.wallet_storage
            .get_by_did(did)
            .await?
            .ok_or_else(|| TokenServiceError::UnknownWallet(did.to_owned()))
    }
}
