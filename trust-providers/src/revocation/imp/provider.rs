use std::sync::Arc;

use crate::revocation::{provider::RevocationMethodProvider, RevocationMethod};

pub struct RevocationMethodProviderImpl {
    revocation_methods: Vec<Arc<dyn RevocationMethod>>,
}

impl RevocationMethodProviderImpl {
    pub fn new(revocation_methods: Vec<Arc<dyn RevocationMethod>>) -> Self {
        Self { revocation_methods }
    }
}

impl RevocationMethodProvider for RevocationMethodProviderImpl {
    fn get_revocation_method_by_status_type(
        &self,
        credential_status_type: &str,
    ) -> Option<Arc<dyn RevocationMethod>> {
        self.revocation_methods
            .iter()
            .find(|method| {
                method
                    .get_status_types()
                    .iter()
                    .any(|status_type| status_type == credential_status_type)
            })
            .cloned()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::revocation::MockRevocationMethod;

    #[test]
    fn test_lookup_by_status_type() {
        let mut method = MockRevocationMethod::new();
        method
            .expect_get_status_types()
            .returning(|| vec!["BitstringStatusListEntry".to_string()]);

        let provider = RevocationMethodProviderImpl::new(vec![Arc::new(method)]);

        assert!(provider
            .get_revocation_method_by_status_type("BitstringStatusListEntry")
            .is_some());
        assert!(provider
            .get_revocation_method_by_status_type("StatusList2021Entry")
            .is_none());
    }
}
