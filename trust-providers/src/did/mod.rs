//! DID resolution.
//!
//! Decentralized identifiers (DIDs) resolve to a DID document listing the
//! verification keys of the identified wallet. Token and presentation
//! signatures are always checked against keys obtained here.

use async_trait::async_trait;

use crate::{
    common_models::did::DidValue,
    did::{
        error::DidMethodError,
        model::DidDocument,
    },
};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

/// Resolves DIDs of one DID method.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DidMethod: Send + Sync {
    /// Resolve a DID to its DID document.
    async fn resolve(&self, did: &DidValue) -> Result<DidDocument, DidMethodError>;
}
