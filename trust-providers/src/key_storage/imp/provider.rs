use std::{collections::HashMap, sync::Arc};

use crate::key_storage::{provider::KeyProvider, KeyStorage};

pub struct KeyProviderImpl {
    storages: HashMap<String, Arc<dyn KeyStorage>>,
}

impl KeyProviderImpl {
    pub fn new(storages: HashMap<String, Arc<dyn KeyStorage>>) -> Self {
        Self { storages }
    }
}

impl KeyProvider for KeyProviderImpl {
    fn get_key_storage(&self, storage_type: &str) -> Option<Arc<dyn KeyStorage>> {
        self.storages.get(storage_type).cloned()
    }
}
