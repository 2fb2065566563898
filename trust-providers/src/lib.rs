//! Providers behind the trust-token exchange between organisational wallets.
//!
//! The [`exchange_protocol::self_issued`] module holds the protocol itself:
//! token issuance, validation, replay protection and scope-gated
//! presentations. The remaining modules are the pluggable collaborators it is
//! built on: DID resolution, key storage and signing, presentation formats,
//! revocation checks and persistence.

pub mod common_dto;
pub mod common_models;
pub mod credential_formatter;
pub mod crypto;
pub mod did;
pub mod exchange_protocol;
pub mod key_algorithm;
pub mod key_signer;
pub mod key_storage;
pub mod revocation;
pub mod storage;
pub mod util;
