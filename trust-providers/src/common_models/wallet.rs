use super::{did::DidValue, key::KeyHandle};

/// An organisational wallet hosted by this service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wallet {
    pub did: DidValue,
    /// Business partner number of the organisation.
    pub bpn: String,
    pub name: String,
    pub key: KeyHandle,
}
