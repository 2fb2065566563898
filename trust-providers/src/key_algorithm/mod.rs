//! Key algorithm representations and signer lookup.
//!
//! A key algorithm knows how public keys of its type are written as JWKs,
//! which crypto signer verifies them and which JOSE `alg` value names it in
//! token headers.

use error::KeyAlgorithmError;
use model::GeneratedKey;

use crate::common_models::PublicKeyJwk;

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

/// Find signer IDs and convert key representations.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithm: Send + Sync {
    /// Finds related crypto signer ID.
    fn get_signer_algorithm_id(&self) -> String;

    /// The JOSE `alg` header value of signatures made with this key type.
    fn get_jose_algorithm(&self) -> String;

    /// Generates a new in-memory key-pair.
    fn generate_key_pair(&self) -> GeneratedKey;

    /// Converts public key bytes to JWK.
    fn bytes_to_jwk(
        &self,
        bytes: &[u8],
        r#use: Option<String>,
    ) -> Result<PublicKeyJwk, KeyAlgorithmError>;

    /// Converts JWK to key bytes.
    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError>;
}
