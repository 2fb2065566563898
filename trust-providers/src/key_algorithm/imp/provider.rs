use std::{collections::HashMap, sync::Arc};

use crate::{
    crypto::{CryptoProvider, Signer},
    key_algorithm::{error::KeyAlgorithmProviderError, provider::KeyAlgorithmProvider, KeyAlgorithm},
};

pub struct KeyAlgorithmProviderImpl {
    algorithms: HashMap<String, Arc<dyn KeyAlgorithm>>,
    crypto: Arc<dyn CryptoProvider>,
}

impl KeyAlgorithmProviderImpl {
    pub fn new(
        algorithms: HashMap<String, Arc<dyn KeyAlgorithm>>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self { algorithms, crypto }
    }
}

impl KeyAlgorithmProvider for KeyAlgorithmProviderImpl {
    fn get_key_algorithm(&self, algorithm: &str) -> Option<Arc<dyn KeyAlgorithm>> {
        self.algorithms.get(algorithm).cloned()
    }

    fn get_key_algorithm_from_jose_alg(
        &self,
        jose_alg: &str,
    ) -> Option<(String, Arc<dyn KeyAlgorithm>)> {
        self.algorithms
            .iter()
            .find(|(_, algorithm)| algorithm.get_jose_algorithm() == jose_alg)
            .map(|(name, algorithm)| (name.to_owned(), algorithm.clone()))
    }

    fn get_signer(&self, algorithm: &str) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError> {
        let key_algorithm = self.get_key_algorithm(algorithm).ok_or(
            KeyAlgorithmProviderError::MissingAlgorithmImplementation(algorithm.to_owned()),
        )?;
        let signer_algorithm = key_algorithm.get_signer_algorithm_id();
        self.crypto
            .get_signer(&signer_algorithm)
            .map_err(|e| KeyAlgorithmProviderError::MissingSignerImplementation(e.to_string()))
    }
}
