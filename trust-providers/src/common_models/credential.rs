use serde::{Deserialize, Serialize};

use super::did::DidValue;
use crate::credential_formatter::model::CredentialStatus;

/// A verifiable credential held by a wallet, kept in its issued JSON-LD form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeldCredential {
    pub id: String,
    pub holder: DidValue,
    pub types: Vec<String>,
    pub status: Option<CredentialStatus>,
    pub document: serde_json::Value,
}

impl HeldCredential {
    pub fn has_type(&self, credential_type: &str) -> bool {
        self.types.iter().any(|t| t == credential_type)
    }
}
