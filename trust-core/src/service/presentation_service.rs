//! Answering presentation requests and verifying received presentations.

use std::sync::Arc;

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};
use trust_providers::{
    credential_formatter::{
        error::FormatterError,
        model::{ExtractPresentationCtx, Presentation},
        provider::CredentialFormatterProvider,
    },
    exchange_protocol::self_issued::{
        presentation::{PresentationFormat, PresentationGate, SignedPresentation},
        replay::{ClaimOutcome, ReplayGuard},
        validator::TokenValidator,
    },
    key_signer::{imp::KeySignerVerification, KeySigner},
};

use super::error::PresentationServiceError;

/// Outcome of checking a received presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationValidation {
    pub valid: bool,
    pub signature_valid: bool,
    pub jwt_expiry_valid: bool,
    /// Set when an expected audience was given.
    pub audience_valid: Option<bool>,
    /// Set when credential expiry was requested.
    pub credential_expiry_valid: Option<bool>,
    pub presentation: Presentation,
}

pub struct PresentationService {
    validator: Arc<TokenValidator>,
    replay_guard: ReplayGuard,
    gate: PresentationGate,
    formatter_provider: Arc<dyn CredentialFormatterProvider>,
    key_signer: Arc<dyn KeySigner>,
}

impl PresentationService {
    pub fn new(
        validator: Arc<TokenValidator>,
        replay_guard: ReplayGuard,
        gate: PresentationGate,
        formatter_provider: Arc<dyn CredentialFormatterProvider>,
        key_signer: Arc<dyn KeySigner>,
    ) -> Self {
        Self {
            validator,
            replay_guard,
            gate,
            formatter_provider,
            key_signer,
        }
    }

    /// Validates the self-issued token, consumes it and presents the
    /// credentials its access token grants.
    pub async fn request_presentation(
        &self,
        token: &str,
        as_jwt: bool,
    ) -> Result<SignedPresentation, PresentationServiceError> {
        let validated = self
            .validator
            .validate_token_at(token, OffsetDateTime::now_utc())
            .await?;

        if !validated.result.is_valid() {
            return Err(PresentationServiceError::InvalidToken(
                validated.result.error_message(),
            ));
        }

        let claims = validated.token.payload;
        let jti = claims
            .jwt_id
            .ok_or_else(|| PresentationServiceError::MalformedToken("Missing jti".to_owned()))?;
        let expires_at = claims
            .expires_at
            .ok_or_else(|| PresentationServiceError::MalformedToken("Missing exp".to_owned()))?;
        let access_token = claims.custom.access_token.ok_or_else(|| {
            PresentationServiceError::MalformedToken("Missing access token".to_owned())
        })?;

        if self.replay_guard.claim(&jti, expires_at).await? == ClaimOutcome::AlreadyUsed {
            return Err(PresentationServiceError::AlreadyUsed(jti));
        }

        Ok(self.gate.create_presentation(&access_token, as_jwt).await?)
    }

    /// Verifies a JWT or JSON-LD presentation signed by its holder.
    pub async fn validate_presentation(
        &self,
        presentation: &str,
        expected_audience: Option<&str>,
        check_credential_expiry: bool,
    ) -> Result<PresentationValidation, PresentationServiceError> {
        let format = if presentation.trim_start().starts_with('{') {
            PresentationFormat::JsonLd
        } else {
            PresentationFormat::Jwt
        };

        let formatter = self
            .formatter_provider
            .get_formatter(&format.to_string())
            .ok_or_else(|| {
                PresentationServiceError::MalformedPresentation(format!(
                    "Unsupported format `{format}`"
                ))
            })?;

        let verification = KeySignerVerification::new_verification_fn(self.key_signer.clone());

        let (parsed, signature_valid) = match formatter
            .extract_presentation(presentation, verification, ExtractPresentationCtx::default())
            .await
        {
            Ok(parsed) => (parsed, true),
            Err(FormatterError::CouldNotVerify(reason)) => {
                tracing::debug!(%reason, "presentation signature not verified");
                let parsed = formatter
                    .extract_presentation_unverified(presentation, ExtractPresentationCtx::default())
                    .await
                    .map_err(|e| PresentationServiceError::MalformedPresentation(e.to_string()))?;
                (parsed, false)
            }
            Err(error) => {
                return Err(PresentationServiceError::MalformedPresentation(
                    error.to_string(),
                ))
            }
        };

        let now = OffsetDateTime::now_utc();
        let leeway = Duration::seconds(formatter.get_leeway().try_into().unwrap_or(i64::MAX));

        let jwt_expiry_valid = parsed
            .expires_at
            .is_some_and(|expires_at| now <= expires_at.saturating_add(leeway))
            && parsed
                .issued_at
                .map_or(true, |issued_at| issued_at.saturating_sub(leeway) <= now);

        let audience_valid =
            expected_audience.map(|expected| parsed.audience.as_deref() == Some(expected));

        let credential_expiry_valid = check_credential_expiry.then(|| {
            parsed
                .credentials
                .iter()
                .all(|credential| credential_not_expired(credential, now))
        });

        Ok(PresentationValidation {
            valid: signature_valid
                && jwt_expiry_valid
                && audience_valid.unwrap_or(true)
                && credential_expiry_valid.unwrap_or(true),
            signature_valid,
            jwt_expiry_valid,
            audience_valid,
            credential_expiry_valid,
            presentation: parsed,
        })
    }
}

/// Checks `expirationDate` (VC 1.1) or `validUntil` (VC 2.0); absence means no expiry.
fn credential_not_expired(credential: &serde_json::Value, now: OffsetDateTime) -> bool {
    let expiry = credential
        .get("expirationDate")
        .or_else(|| credential.get("validUntil"));

    match expiry {
        None => true,
        Some(value) => value
            .as_str()
            .and_then(|value| OffsetDateTime::parse(value, &Rfc3339).ok())
            .is_some_and(|expires_at| now <= expires_at),
    }
}
