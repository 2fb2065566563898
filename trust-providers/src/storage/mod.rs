//! Persistence boundaries: wallets, held credentials and replay records.

use thiserror::Error;

pub mod credential;
pub mod in_memory;
pub mod replay;
pub mod wallet;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: `{0}`")]
    Unavailable(String),
}
