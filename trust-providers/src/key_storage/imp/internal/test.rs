use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;
use zeroize::Zeroizing;

use super::{InternalKeyStorage, Params};
use crate::{
    common_models::key::KeyHandle,
    crypto::{CryptoProvider, MockSigner, SignerError},
    key_algorithm::{
        imp::{eddsa::Eddsa, provider::KeyAlgorithmProviderImpl},
        model::GeneratedKey,
        provider::MockKeyAlgorithmProvider,
        MockKeyAlgorithm,
    },
    key_storage::{error::KeyStorageError, KeyStorage},
};

fn mock_key_algorithm_provider() -> MockKeyAlgorithmProvider {
    let mut key_algorithm = MockKeyAlgorithm::default();
    key_algorithm
        .expect_generate_key_pair()
        .times(1)
        .returning(|| GeneratedKey {
            public: vec![1],
            private: Zeroizing::new(vec![1, 2, 3]),
        });

    let key_algorithm = Arc::new(key_algorithm);

    let mut key_algorithm_provider = MockKeyAlgorithmProvider::default();
    key_algorithm_provider
        .expect_get_key_algorithm()
        .times(1)
        .returning(move |_| Some(key_algorithm.clone()));

    key_algorithm_provider
}

fn key_handle(public_key: Vec<u8>, key_reference: Vec<u8>) -> KeyHandle {
    KeyHandle {
        id: Uuid::new_v4().into(),
        wallet_did: "did:web:host:A".parse().unwrap(),
        verification_method_id: None,
        public_key,
        key_reference,
        storage_type: "INTERNAL".to_string(),
        key_type: "EDDSA".to_string(),
    }
}

fn real_key_algorithm_provider() -> Arc<KeyAlgorithmProviderImpl> {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(trust_crypto::imp::CryptoProviderImpl::new(
        HashMap::new(),
        HashMap::from([(
            "Ed25519".to_string(),
            Arc::new(trust_crypto::imp::signer::eddsa::Ed25519Signer) as _,
        )]),
    ));

    Arc::new(KeyAlgorithmProviderImpl::new(
        HashMap::from([("EDDSA".to_string(), Arc::new(Eddsa) as _)]),
        crypto,
    ))
}

#[tokio::test]
async fn test_internal_generate() {
    let storage = InternalKeyStorage::new(
        Arc::new(mock_key_algorithm_provider()),
        Params { encryption: None },
    );

    let result = storage
        .generate(&Uuid::new_v4().into(), "EDDSA")
        .await
        .unwrap();

    assert_eq!(result.key_reference, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_internal_generate_with_encryption() {
    let storage = InternalKeyStorage::new(
        Arc::new(mock_key_algorithm_provider()),
        Params {
            encryption: Some("password".to_string()),
        },
    );

    let result = storage
        .generate(&Uuid::new_v4().into(), "EDDSA")
        .await
        .unwrap();

    // 3 bytes of payload plus the cocoon prefix and tag
    assert_eq!(result.key_reference.len(), 39);
    assert_ne!(&result.key_reference[..3], &[1, 2, 3]);
}

#[tokio::test]
async fn test_internal_generate_unknown_algorithm() {
    let mut key_algorithm_provider = MockKeyAlgorithmProvider::default();
    key_algorithm_provider
        .expect_get_key_algorithm()
        .returning(|_| None);

    let storage =
        InternalKeyStorage::new(Arc::new(key_algorithm_provider), Params::default());

    let result = storage.generate(&Uuid::new_v4().into(), "ES256").await;

    assert!(matches!(result, Err(KeyStorageError::InvalidKeyAlgorithm(alg)) if alg == "ES256"));
}

#[tokio::test]
async fn test_internal_sign_with_encryption() {
    let mut key_algorithm_provider = mock_key_algorithm_provider();

    let mut signer = MockSigner::default();
    signer
        .expect_sign()
        .withf(|message, _, private_key| message == b"message" && private_key == &[1, 2, 3])
        .times(1)
        .returning(|_, _, _| Ok(vec![1u8]));
    let signer = Arc::new(signer);

    key_algorithm_provider
        .expect_get_signer()
        .times(1)
        .returning(move |_| Ok(signer.clone()));

    let storage = InternalKeyStorage::new(
        Arc::new(key_algorithm_provider),
        Params {
            encryption: Some("password".to_string()),
        },
    );

    let generated_key = storage
        .generate(&Uuid::new_v4().into(), "EDDSA")
        .await
        .unwrap();

    let key = key_handle(generated_key.public_key, generated_key.key_reference);

    assert_eq!(storage.sign(&key, b"message").await.unwrap(), vec![1u8]);
}

#[tokio::test]
async fn test_internal_sign_ed25519_verifiable() {
    let key_algorithm_provider = real_key_algorithm_provider();
    let storage = InternalKeyStorage::new(
        key_algorithm_provider,
        Params {
            encryption: Some("correct horse".to_string()),
        },
    );

    let generated_key = storage
        .generate(&Uuid::new_v4().into(), "EDDSA")
        .await
        .unwrap();
    let public_key = generated_key.public_key.clone();
    let key = key_handle(generated_key.public_key, generated_key.key_reference);

    let signature = storage.sign(&key, b"header.payload").await.unwrap();

    let public_key = ed25519_compact::PublicKey::from_slice(&public_key).unwrap();
    let signature = ed25519_compact::Signature::from_slice(&signature).unwrap();
    assert!(public_key.verify(b"header.payload", &signature).is_ok());
}

#[tokio::test]
async fn test_internal_sign_with_wrong_passphrase() {
    let generated_key = InternalKeyStorage::new(
        real_key_algorithm_provider(),
        Params {
            encryption: Some("first".to_string()),
        },
    )
    .generate(&Uuid::new_v4().into(), "EDDSA")
    .await
    .unwrap();

    let storage = InternalKeyStorage::new(
        real_key_algorithm_provider(),
        Params {
            encryption: Some("second".to_string()),
        },
    );
    let key = key_handle(generated_key.public_key, generated_key.key_reference);

    let result = storage.sign(&key, b"message").await;

    assert_eq!(result, Err(SignerError::CouldNotExtractKeyPair));
}
