//! Implementations of DID methods.

pub mod dto;
pub mod mapper;
pub mod provider;
pub mod web;
