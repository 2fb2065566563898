//! Implementations of key algorithms.

pub mod provider;

pub mod eddsa;
