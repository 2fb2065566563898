//! Implementations of presentation formats.

pub mod json_ld;
pub mod jwt;
pub mod jwt_formatter;
pub mod provider;

#[cfg(any(test, feature = "mock"))]
pub mod test_utilities;
