use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    did::DidValue,
    macros::{impl_display, impl_from, impl_into},
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyId(Uuid);
impl_display!(KeyId);
impl_from!(KeyId; Uuid);
impl_into!(KeyId; Uuid);

/// Reference to a signing key held by a wallet.
///
/// `key_reference` is opaque outside the key storage that produced it (for the
/// internal storage it is the optionally encrypted private key).
#[derive(Clone, Eq, PartialEq)]
pub struct KeyHandle {
    pub id: KeyId,
    pub wallet_did: DidValue,
    /// Verification method id inside the wallet's DID document, used as `kid`.
    pub verification_method_id: Option<String>,
    pub public_key: Vec<u8>,
    pub key_reference: Vec<u8>,
    pub storage_type: String,
    pub key_type: String,
}

impl std::fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHandle")
            .field("id", &self.id)
            .field("wallet_did", &self.wallet_did)
            .field("verification_method_id", &self.verification_method_id)
            .field("storage_type", &self.storage_type)
            .field("key_type", &self.key_type)
            .finish_non_exhaustive()
    }
}
