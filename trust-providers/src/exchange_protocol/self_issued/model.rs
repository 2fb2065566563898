use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::credential_formatter::imp::jwt::Jwt;

/// Custom claims of the outer self-issued token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiTokenClaims {
    #[serde(rename = "access_token", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Custom claims of the embedded access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

pub type SiToken = Jwt<SiTokenClaims>;
pub type AccessToken = Jwt<AccessTokenClaims>;

/// A freshly signed self-issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub access_token: String,
    pub jti: String,
    pub nonce: String,
    pub expires_at: OffsetDateTime,
}
