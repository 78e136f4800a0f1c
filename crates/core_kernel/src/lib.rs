//! Core Kernel - Foundational types for the menu platform
//!
//! This crate provides the building blocks shared across the data-access
//! subsystem:
//! - The error classification vocabulary consumed by the retry wrapper,
//!   the HTTP boundary, and the client-side query policy
//! - Common error types for configuration and validation

pub mod classification;
pub mod error;

pub use classification::{ErrorKind, SQLSTATE_DUPLICATE_PREPARED_STATEMENT};
pub use error::CoreError;
