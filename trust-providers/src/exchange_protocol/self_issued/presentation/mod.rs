//! Scope-gated disclosure of held credentials.

use std::{collections::HashSet, sync::Arc};

use futures::future::try_join_all;
use serde::Deserialize;
use strum::{Display, EnumString};

use super::{
    error::PresentationGateError,
    model::AccessToken,
    scope::{Scope, ScopeOperation},
    TOKEN_ALGORITHM,
};
use crate::{
    common_models::{
        credential::HeldCredential,
        did::{DidValue, InvalidDidError},
        wallet::Wallet,
    },
    credential_formatter::{model::FormatPresentationCtx, provider::CredentialFormatterProvider},
    key_signer::{imp::KeySignatureProvider, KeySigner},
    revocation::{model::CredentialRevocationState, provider::RevocationMethodProvider},
    storage::{credential::CredentialStorage, wallet::WalletStorage},
};


pub const DEFAULT_SCOPE_NAMESPACE: &str = "org.eclipse.tractusx.vc.type";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default = "default_scope_namespace")]
    pub scope_namespace: String,
    /// Refuse to disclose when a revocation status cannot be obtained.
    #[serde(default)]
    pub enforce_revocation: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            scope_namespace: default_scope_namespace(),
            enforce_revocation: false,
        }
    }
}

fn default_scope_namespace() -> String {
    DEFAULT_SCOPE_NAMESPACE.to_owned()
}

/// Encoding of a signed presentation; the value doubles as formatter id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum PresentationFormat {
    #[strum(serialize = "JWT")]
    Jwt,
    #[strum(serialize = "JSON_LD")]
    JsonLd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPresentation {
    pub format: PresentationFormat,
    pub content: String,
}

pub struct PresentationGate {
    key_signer: Arc<dyn KeySigner>,
    wallet_storage: Arc<dyn WalletStorage>,
    credential_storage: Arc<dyn CredentialStorage>,
    formatter_provider: Arc<dyn CredentialFormatterProvider>,
    revocation_method_provider: Option<Arc<dyn RevocationMethodProvider>>,
    params: Params,
}

impl PresentationGate {
    pub fn new(
        key_signer: Arc<dyn KeySigner>,
        wallet_storage: Arc<dyn WalletStorage>,
        credential_storage: Arc<dyn CredentialStorage>,
        formatter_provider: Arc<dyn CredentialFormatterProvider>,
        revocation_method_provider: Option<Arc<dyn RevocationMethodProvider>>,
        params: Params,
    ) -> Self {
        Self {
            key_signer,
            wallet_storage,
            credential_storage,
            formatter_provider,
            revocation_method_provider,
            params,
        }
    }

    /// Presents the credentials granted by `access_token`, signed by the token
    /// subject and addressed to the token issuer.
    ///
    /// The token must already have passed validation and its outer token must
    /// have been claimed; nothing is persisted here.
    pub async fn create_presentation(
        &self,
        access_token: &str,
        as_jwt: bool,
    ) -> Result<SignedPresentation, PresentationGateError> {
        let claims = AccessToken::decompose_token(access_token)
            .map_err(|e| PresentationGateError::MalformedToken(e.to_string()))?
            .payload;

        let scope = claims.custom.scope.as_deref().unwrap_or_default();
        let scopes = Scope::parse_all(scope, &self.params.scope_namespace)?;

        if let Some(scope) = scopes
            .iter()
            .find(|scope| scope.operation != ScopeOperation::Read)
        {
            return Err(PresentationGateError::PermissionViolation(scope.to_string()));
        }

        let holder: DidValue = claims
            .subject
            .as_deref()
            .ok_or_else(|| PresentationGateError::MalformedToken("Missing subject".to_owned()))?
            .parse()
            .map_err(|e: InvalidDidError| PresentationGateError::MalformedToken(e.to_string()))?;

        let audience = claims
            .issuer
            .ok_or_else(|| PresentationGateError::MalformedToken("Missing issuer".to_owned()))?;

        let wallet = self
            .wallet_storage
            .get_by_did(&holder)
            .await?
            .ok_or_else(|| PresentationGateError::UnknownHolder(holder.to_owned()))?;

        let credentials = self.select_credentials(&wallet, &scopes).await?;

        let format = if as_jwt {
            PresentationFormat::Jwt
        } else {
            PresentationFormat::JsonLd
        };

        let formatter = self
            .formatter_provider
            .get_formatter(&format.to_string())
            .ok_or_else(|| PresentationGateError::MissingFormatter(format.to_string()))?;

        let documents: Vec<serde_json::Value> = credentials
            .iter()
            .map(|credential| credential.document.to_owned())
            .collect();

        let content = formatter
            .format_presentation(
                &documents,
                &wallet.did,
                TOKEN_ALGORITHM,
                KeySignatureProvider::new_auth_fn(self.key_signer.clone(), wallet.key.to_owned()),
                FormatPresentationCtx {
                    nonce: claims.nonce,
                    audience: Some(audience.to_owned()),
                },
            )
            .await
            .map_err(|e| PresentationGateError::SigningFailure(e.to_string()))?;

        tracing::info!(
            holder = %wallet.did,
            %audience,
            %format,
            credentials = documents.len(),
            "disclosed credentials"
        );

        Ok(SignedPresentation { format, content })
    }

    /// Non-revoked credentials of `wallet` for every scope, each at most once.
    async fn select_credentials(
        &self,
        wallet: &Wallet,
        scopes: &[Scope],
    ) -> Result<Vec<HeldCredential>, PresentationGateError> {
        let mut seen = HashSet::new();
        let mut selected = vec![];

        for scope in scopes {
            let held = self
                .credential_storage
                .get_held_by(&wallet.did, &scope.credential_type)
                .await?;

            let disclosable =
                try_join_all(held.iter().map(|credential| self.is_disclosable(credential)))
                    .await?;

            let mut matched = false;
            for (credential, disclosable) in held.into_iter().zip(disclosable) {
                if !disclosable {
                    continue;
                }

                matched = true;
                if seen.insert(credential.id.to_owned()) {
                    selected.push(credential);
                }
            }

            if !matched {
                return Err(PresentationGateError::MissingCredentialType(
                    scope.credential_type.to_owned(),
                ));
            }
        }

        Ok(selected)
    }

    async fn is_disclosable(
        &self,
        credential: &HeldCredential,
    ) -> Result<bool, PresentationGateError> {
        let (Some(status), Some(provider)) =
            (&credential.status, &self.revocation_method_provider)
        else {
            return Ok(true);
        };

        let state = match provider.get_revocation_method_by_status_type(&status.r#type) {
            Some(method) => method
                .check_credential_revocation_status(status)
                .await
                .map_err(|e| e.to_string()),
            None => Err(format!("Unsupported status type `{}`", status.r#type)),
        };

        match state {
            Ok(CredentialRevocationState::Active) => Ok(true),
            Ok(CredentialRevocationState::Revoked) => {
                tracing::debug!(credential = %credential.id, "skipping revoked credential");
                Ok(false)
            }
            Err(error) if self.params.enforce_revocation => {
                Err(PresentationGateError::RevocationUnavailable(error))
            }
            Err(error) => {
                tracing::warn!(credential = %credential.id, %error, "revocation status unavailable");
                Ok(true)
            }
        }
    }
}
