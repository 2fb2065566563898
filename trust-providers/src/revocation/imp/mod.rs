//! Implementations of revocation checks.

pub mod provider;
pub mod revocation_service;
