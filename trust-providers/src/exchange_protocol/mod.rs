//! Token exchange protocols between wallets.

pub mod self_issued;
