use sha2::{Digest, Sha256};

use crate::{Hasher, HasherError};

pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Sha256::digest(input).to_vec())
    }
}
