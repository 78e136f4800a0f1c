//! Client-Side Query Policy
//!
//! This crate governs the data-fetching behavior of menu platform clients:
//! when a failed request is re-issued, how long cached reads stay fresh, and
//! how cached values are serialized for hydration across the client/server
//! boundary.
//!
//! It shares the [`core_kernel::ErrorKind`] vocabulary with the server-side
//! retry wrapper, so both ends classify a failure identically and divide the
//! retry responsibility: the server retries only statement conflicts, the
//! client decides everything else.
//!
//! # Example
//!
//! ```rust
//! use client_policy::RetryPolicy;
//! use core_kernel::ErrorKind;
//!
//! let reads = RetryPolicy::reads();
//! assert!(reads.should_retry(1, ErrorKind::PoolTimeout));
//! assert!(!RetryPolicy::writes().should_retry(0, ErrorKind::PoolTimeout));
//! ```

pub mod cache;
pub mod retry;
pub mod value;

pub use cache::{
    CachedQuery, DehydratedQuery, DehydratedState, QueryCache, QueryState, DEFAULT_STALE_TIME,
};
pub use retry::RetryPolicy;
pub use value::RichValue;
