//! Infrastructure Database Layer
//!
//! This crate provides the resilient database access layer for the menu
//! platform: a process-wide pooled connection handle, one-shot decoding of
//! raw driver failures into the shared classification vocabulary, and the
//! retry policies the route handlers call through.
//!
//! # Architecture
//!
//! - **Pool**: a construct-once handle with a best-effort `recycle()`
//!   capability, configured for operation behind a connection multiplexer
//!   (prepared-statement caching off by default)
//! - **Error decode**: `sqlx::Error` is decoded exactly once into
//!   [`DbError`]; downstream layers branch on its [`core_kernel::ErrorKind`]
//! - **Retry**: `safe_query` (2 attempts) and `safe_mutation` (3 attempts)
//!   re-attempt only transient prepared-statement conflicts, with linear
//!   backoff and a connection recycle between attempts
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{safe_query, Db, DbConfig, DbError};
//!
//! let db = Db::global(DbConfig::from_env()?).await?;
//! let pool = db.pool();
//! let row = safe_query(db, || async {
//!     sqlx::query("SELECT 1").fetch_one(&pool).await.map_err(DbError::from)
//! })
//! .await?;
//! ```

pub mod error;
pub mod pool;
pub mod retry;

pub use error::DbError;
pub use pool::{Db, DbConfig, PoolStats};
pub use retry::{
    safe_mutation, safe_query, with_retry, RecycleConnection, MUTATION_MAX_ATTEMPTS,
    QUERY_MAX_ATTEMPTS,
};
