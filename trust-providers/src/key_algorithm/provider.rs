//! Key algorithm provider.

use std::sync::Arc;

use super::{error::KeyAlgorithmProviderError, KeyAlgorithm};
use crate::crypto::Signer;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithmProvider: Send + Sync {
    fn get_key_algorithm(&self, algorithm: &str) -> Option<Arc<dyn KeyAlgorithm>>;

    /// Finds a key algorithm by the JOSE `alg` value of a token header.
    ///
    /// Returns the configured algorithm name together with the implementation.
    fn get_key_algorithm_from_jose_alg(
        &self,
        jose_alg: &str,
    ) -> Option<(String, Arc<dyn KeyAlgorithm>)>;

    fn get_signer(&self, algorithm: &str) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError>;
}
