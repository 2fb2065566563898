//! Services orchestrating the providers.

pub mod error;
pub mod presentation_service;
pub mod token_service;
