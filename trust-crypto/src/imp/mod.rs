use std::{collections::HashMap, sync::Arc};

use super::{CryptoProvider, CryptoProviderError, Hasher, Signer};

pub mod hasher;
pub mod signer;
pub mod utilities;


#[derive(Clone)]
pub struct CryptoProviderImpl {
    hashers: HashMap<String, Arc<dyn Hasher>>,
    signers: HashMap<String, Arc<dyn Signer>>,
}

impl CryptoProviderImpl {
    pub fn new(
        hashers: HashMap<String, Arc<dyn Hasher>>,
        signers: HashMap<String, Arc<dyn Signer>>,
    ) -> Self {
        Self { hashers, signers }
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError> {
        lookup(&self.hashers, hasher, CryptoProviderError::MissingHasher)
    }

    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError> {
        lookup(&self.signers, signer, CryptoProviderError::MissingSigner)
    }
}

fn lookup<T: ?Sized>(
    registry: &HashMap<String, Arc<T>>,
    id: &str,
    missing: fn(String) -> CryptoProviderError,
) -> Result<Arc<T>, CryptoProviderError> {
    registry.get(id).cloned().ok_or_else(|| missing(id.to_owned()))
}
