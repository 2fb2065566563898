//! `struct`s and `enum`s for key storage provider.

pub struct StorageGeneratedKey {
    pub public_key: Vec<u8>,
    pub key_reference: Vec<u8>,
}
