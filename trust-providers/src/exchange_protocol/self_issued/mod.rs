//! Self-issued token exchange.
//!
//! A requesting wallet proves its identity with a self-issued ID token
//! (`iss == sub`) addressed to a partner wallet. The token embeds an access
//! token carrying the requested scope; both layers share one nonce and are
//! signed with the requester's key.
//!
//! The partner validates the token with [`validator::TokenValidator`], claims
//! its `jti` once through [`replay::ReplayGuard`] and answers with a signed
//! presentation built by [`presentation::PresentationGate`].

pub mod error;
pub mod issuer;
pub mod model;
pub mod presentation;
pub mod replay;
pub mod scope;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utilities;

/// JOSE algorithm of both token layers.
pub const TOKEN_ALGORITHM: &str = "EdDSA";
pub const TOKEN_TYPE: &str = "JWT";
