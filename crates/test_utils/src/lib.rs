//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the data-access test suite.
//!
//! # Modules
//!
//! - `errors`: canned classified errors for each class the decode produces
//! - `ops`: flaky-operation builders and recycle probes for exercising the
//!   retry wrapper without a live database

pub mod errors;
pub mod ops;

pub use errors::*;
pub use ops::*;
