//! `struct`s and `enum`s for DID resolution.

use crate::common_models::{did::DidValue, PublicKeyJwk};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidDocument {
    pub context: serde_json::Value,
    pub id: DidValue,
    pub verification_method: Vec<DidVerificationMethod>,
    pub authentication: Option<Vec<String>>,
    pub assertion_method: Option<Vec<String>>,

    pub rest: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidVerificationMethod {
    pub id: String,
    pub r#type: String,
    pub controller: String,
    pub public_key_jwk: PublicKeyJwk,
}
