//! Implementations of key storage.

pub mod internal;
pub mod provider;
