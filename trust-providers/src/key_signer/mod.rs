//! Signing with wallet keys and verifying against DID-resolved keys.
//!
//! [`KeySigner`] is the only path through which tokens and presentations are
//! signed or verified. Private keys stay inside the key storage; each call
//! fetches what it needs through the storage and nothing is cached here.

use async_trait::async_trait;

use crate::common_models::{did::DidValue, key::KeyHandle};

pub mod error;
pub mod imp;

use error::KeySignerError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait KeySigner: Send + Sync {
    /// Signs `message` with the private key behind `key`.
    async fn sign(&self, key: &KeyHandle, message: &[u8]) -> Result<Vec<u8>, KeySignerError>;

    /// Checks `signature` over `message` with a key of the `did` document.
    ///
    /// Returns `Ok(false)` for a well-formed check that failed and `Err` when
    /// no key could be obtained for the check.
    async fn verify<'a>(
        &self,
        did: &DidValue,
        key_id: Option<&'a str>,
        algorithm: &'a str,
        message: &'a [u8],
        signature: &'a [u8],
    ) -> Result<bool, KeySignerError>;
}
