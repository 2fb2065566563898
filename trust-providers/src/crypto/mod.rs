//! Re-exports of the cryptographic primitives used by the providers.

pub use trust_crypto::{
    imp::utilities, CryptoProvider, CryptoProviderError, Hasher, HasherError, Signer,
    SignerError,
};

#[cfg(any(test, feature = "mock"))]
pub use trust_crypto::{MockCryptoProvider, MockHasher, MockSigner};
