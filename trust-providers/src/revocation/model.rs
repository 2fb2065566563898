//! `struct`s and `enum`s for revocation method provider.

use strum::Display;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum CredentialRevocationState {
    Active,
    Revoked,
}
