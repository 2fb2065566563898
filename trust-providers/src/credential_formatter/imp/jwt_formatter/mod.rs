//! Verifiable presentations as JWT (`vp` claim), signed by the holder.

use async_trait::async_trait;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use self::model::{VPContent, VP};
use super::jwt::{model::JWTPayload, Jwt};
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
};

#[cfg(test)]
mod test;

pub(crate) mod model;

type PresentationClaims = JWTPayload<VP>;

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

pub struct JWTFormatter {
    params: Params,
}

impl JWTFormatter {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    async fn parse(
        &self,
        token: &str,
        verification: Option<VerificationFn>,
        context: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError> {
        let claims = Jwt::<VP>::build_from_token(token, verification).await?.payload;

        if context.nonce.is_some() && context.nonce != claims.nonce {
            return Err(FormatterError::CouldNotExtractPresentation(
                "Nonce mismatch".to_owned(),
            ));
        }

        if claims.issuer.as_deref() != Some(claims.custom.vp.holder.as_str()) {
            return Err(FormatterError::CouldNotExtractPresentation(
                "Presentation not issued by its holder".to_owned(),
            ));
        }

        Ok(claims.into())
    }
}

#[async_trait]
impl CredentialFormatter for JWTFormatter {
    async fn format_presentation(
        &self,
        credentials: &[serde_json::Value],
        holder_did: &DidValue,
        algorithm: &str,
        auth_fn: AuthenticationFn,
        FormatPresentationCtx { nonce, audience }: FormatPresentationCtx,
    ) -> Result<String, FormatterError> {
        let now = OffsetDateTime::now_utc();
        let leeway = Duration::seconds(self.params.leeway.try_into().unwrap_or(i64::MAX));

        let claims = PresentationClaims {
            issued_at: Some(now),
            expires_at: now.checked_add(Duration::seconds(self.params.presentation_validity)),
            invalid_before: now.checked_sub(leeway),
            issuer: Some(holder_did.to_string()),
            subject: Some(holder_did.to_string()),
            audience,
            jwt_id: Some(format!("urn:uuid:{}", Uuid::new_v4())),
            nonce,
            custom: VP {
                vp: VPContent {
                    context: vec![Context::CredentialsV1.to_string()],
                    r#type: vec!["VerifiablePresentation".to_owned()],
                    holder: holder_did.to_string(),
                    verifiable_credential: credentials.to_vec(),
                },
            },
        };

        Jwt::new("JWT".to_owned(), algorithm.to_owned(), auth_fn.get_key_id(), claims)
            .tokenize(auth_fn)
            .await
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

impl From<PresentationClaims> for Presentation {
    fn from(claims: PresentationClaims) -> Self {
        Self {
            id: claims.jwt_id,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
            issuer_did: claims.issuer.and_then(|v| v.parse().ok()),
            audience: claims.audience,
            nonce: claims.nonce,
            credentials: claims.custom.vp.verifiable_credential,
        }
    }
}
