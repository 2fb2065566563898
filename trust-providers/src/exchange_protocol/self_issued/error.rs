use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

use super::scope::ScopeError;
use crate::{common_models::did::DidValue, storage::StorageError};

/// Reasons a self-issued token is rejected.
///
/// These are reported, never raised: validation collects every applicable
/// reason into a `ValidationResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenValidationError {
    AccessTokenMissing,
    IssAndSubNotEqual,
    SubNotMatchAnyDid,
    SubNotDid,
    ExpMissing,
    IatMissing,
    TokenAlreadyExpired,
    IatAfterExpiration,
    CurrentTimeBeforeIat,
    AudMissing,
    AudNotDid,
    AudClaimsNotEqual,
    NonceMissing,
    NonceClaimsNotEqual,
    SignatureNotVerified,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SelfIssuedTokenError {
    #[error("Malformed token: `{0}`")]
    MalformedToken(String),
    #[error("Could not sign token: `{0}`")]
    SigningFailure(String),
    #[error("Token validity out of range: `{0}`")]
    InvalidValidity(time::Duration),
    #[error("Invalid scope: `{0}`")]
    InvalidScope(#[from] ScopeError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum PresentationGateError {
    #[error("Malformed access token: `{0}`")]
    MalformedToken(String),
    #[error("Invalid scope: `{0}`")]
    InvalidScope(#[from] ScopeError),
    #[error("Scope `{0}` does not grant read access")]
    PermissionViolation(String),
    #[error("Holder has no credential of type `{0}`")]
    MissingCredentialType(String),
    #[error("No wallet for holder `{0}`")]
    UnknownHolder(DidValue),
    #[error("Revocation status unavailable: `{0}`")]
    RevocationUnavailable(String),
    #[error("Missing presentation formatter: `{0}`")]
    MissingFormatter(String),
    #[error("Could not sign presentation: `{0}`")]
    SigningFailure(String),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}
