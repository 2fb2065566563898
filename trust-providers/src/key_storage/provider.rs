use std::sync::Arc;

use super::KeyStorage;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyProvider: Send + Sync {
    fn get_key_storage(&self, storage_type: &str) -> Option<Arc<dyn KeyStorage>>;
}
