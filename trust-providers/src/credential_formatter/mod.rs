//! Verifiable presentation formatting, parsing and signing.
//!
//! Held credentials are disclosed wrapped into a presentation signed by the
//! holder, either as a JWT or as a JSON-LD document with an embedded proof.

use async_trait::async_trait;
use error::FormatterError;
use model::{
    AuthenticationFn, ExtractPresentationCtx, FormatPresentationCtx, Presentation, TokenVerifier,
};

use crate::common_models::did::DidValue;

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

/// Format presentations for sharing and parse presentations which have been shared.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CredentialFormatter: Send + Sync {
    /// Formats a presentation of credentials and signs it.
    async fn format_presentation(
        &self,
        credentials: &[serde_json::Value],
        holder_did: &DidValue,
        algorithm: &str,
        auth_fn: AuthenticationFn,
        ctx: FormatPresentationCtx,
    ) -> Result<String, FormatterError>;

    /// Parses a presentation and verifies the signature.
    async fn extract_presentation(
        &self,
        token: &str,
        verification: Box<dyn TokenVerifier>,
        ctx: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError>;

    /// Parses a presentation without verifying the signature.
    async fn extract_presentation_unverified(
        &self,
        token: &str,
        ctx: ExtractPresentationCtx,
    ) -> Result<Presentation, FormatterError>;

    /// Returns the leeway time.
    ///
    /// Leeway is a buffer time (in seconds) added to account for clock skew
    /// between systems when validating issuance and expiration dates.
    fn get_leeway(&self) -> u64;
}
