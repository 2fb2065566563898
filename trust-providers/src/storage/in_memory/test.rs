use serde_json::json;
use time::Duration;
use uuid::Uuid;

use super::*;
use crate::common_models::key::KeyHandle;

fn wallet(did: &str) -> Wallet {
    Wallet {
        did: did.parse().unwrap(),
        bpn: "BPNL000000000001".to_string(),
        name: "Test wallet".to_string(),
        key: KeyHandle {
            id: Uuid::new_v4().into(),
            wallet_did: did.parse().unwrap(),
            verification_method_id: Some(format!("{did}#key-1")),
            public_key: vec![],
            key_reference: vec![],
            storage_type: "INTERNAL".to_string(),
            key_type: "EDDSA".to_string(),
        },
    }
}

fn expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::minutes(5)
}

fn credential(holder: &str, types: &[&str]) -> HeldCredential {
    HeldCredential {
        id: Uuid::new_v4().to_string(),
        holder: holder.parse().unwrap(),
        types: types.iter().map(|t| t.to_string()).collect(),
        status: None,
        document: json!({}),
    }
}

#[tokio::test]
async fn test_wallet_lookup() {
    let storage = InMemoryWalletStorage::new(vec![wallet("did:web:host:A")]);

    assert!(storage
        .get_by_did(&"did:web:host:A".parse().unwrap())
        .await
        .unwrap()
        .is_some());
    assert!(storage
        .get_by_did(&"did:web:host:B".parse().unwrap())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_credentials_filtered_by_holder_and_type() {
    let storage = InMemoryCredentialStorage::new(vec![
        credential("did:web:host:A", &["VerifiableCredential", "BpnCredential"]),
        credential("did:web:host:A", &["VerifiableCredential", "MembershipCredential"]),
        credential("did:web:host:B", &["VerifiableCredential", "BpnCredential"]),
    ]);

    let held = storage
        .get_held_by(&"did:web:host:A".parse().unwrap(), "BpnCredential")
        .await
        .unwrap();

    assert_eq!(held.len(), 1);
    assert!(held[0].has_type("BpnCredential"));
    assert_eq!(held[0].holder.as_str(), "did:web:host:A");
}

#[tokio::test]
async fn test_replay_record_lifecycle() {
    let storage = InMemoryReplayStorage::new();

    assert_eq!(storage.get("jti-1").await.unwrap(), None);

    storage.register("jti-1", expiry()).await.unwrap();
    assert!(!storage.get("jti-1").await.unwrap().unwrap().used);

    assert!(storage.mark_used("jti-1", expiry()).await.unwrap());
    assert!(storage.get("jti-1").await.unwrap().unwrap().used);

    // registering again does not reset the record
    storage.register("jti-1", expiry()).await.unwrap();
    assert!(storage.get("jti-1").await.unwrap().unwrap().used);
    assert!(!storage.mark_used("jti-1", expiry()).await.unwrap());
}

#[tokio::test]
async fn test_mark_used_creates_missing_record() {
    let storage = InMemoryReplayStorage::new();

    assert!(storage.mark_used("jti-2", expiry()).await.unwrap());
    assert!(!storage.mark_used("jti-2", expiry()).await.unwrap());
}

#[tokio::test]
async fn test_stale_records_are_pruned() {
    let storage = InMemoryReplayStorage::new();
    let expired = OffsetDateTime::now_utc() - Duration::seconds(1);

    assert!(storage.mark_used("jti-1", expired).await.unwrap());
    assert_eq!(storage.get("jti-1").await.unwrap(), None);

    storage.register("jti-2", expiry()).await.unwrap();
    assert_eq!(storage.storage.lock().await.len(), 1);
}
