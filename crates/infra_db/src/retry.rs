//! Classification-aware retry for database operations
//!
//! The wrapper re-attempts only transient prepared-statement conflicts,
//! recycling the connection handle between attempts so the next attempt runs
//! on a fresh physical connection. Every other failure propagates to the
//! caller on the first attempt; in particular pool-acquisition timeouts are
//! never retried here, since re-issuing work against a saturated pool only
//! compounds the load.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{safe_query, Db, DbError};
//!
//! let db = Db::global(config).await?;
//! let pool = db.pool();
//! let row = safe_query(db, || async {
//!     sqlx::query("SELECT 1").fetch_one(&pool).await.map_err(DbError::from)
//! })
//! .await?;
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::DbError;
use crate::pool::Db;

/// Attempt budget for the read path. Reads are cheap to fail fast and
/// re-issue from the caller.
pub const QUERY_MAX_ATTEMPTS: u32 = 2;

/// Attempt budget for the write path. Statement collisions are more likely
/// under concurrent write load, so mutations get one extra attempt.
pub const MUTATION_MAX_ATTEMPTS: u32 = 3;

/// Linear backoff step: attempt k is followed by a `k * BACKOFF_STEP` wait
const BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Capability to discard the current logical connection handle.
///
/// [`Db`] implements this by swapping in a freshly-built pool. The trait
/// seam keeps the retry loop testable without a live database.
#[async_trait]
pub trait RecycleConnection: Sync {
    /// Best-effort recycle; implementations swallow their own failures
    async fn recycle(&self);
}

#[async_trait]
impl RecycleConnection for Db {
    async fn recycle(&self) {
        Db::recycle(self).await;
    }
}

/// Runs `op` up to `max_attempts` times (1-indexed, strictly sequential).
///
/// After a transient failure the connection handle is recycled and the task
/// sleeps `100ms * attempt_number` before the next attempt. Non-transient
/// errors propagate immediately without consuming remaining attempts;
/// exhaustion propagates the last observed error.
///
/// There is no cancellation: a dispatched attempt runs to completion or
/// failure.
///
/// # Arguments
///
/// * `handle` - recycle capability, normally the process-wide [`Db`]
/// * `max_attempts` - total attempt budget, at least 1
/// * `op` - zero-argument asynchronous operation
pub async fn with_retry<R, T, F, Fut>(handle: &R, max_attempts: u32, op: F) -> Result<T, DbError>
where
    R: RecycleConnection + ?Sized,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    kind = %error.kind(),
                    %error,
                    "Transient database error, recycling connection before retry"
                );
                handle.recycle().await;
                tokio::time::sleep(BACKOFF_STEP * attempt).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Read-path policy: [`with_retry`] with [`QUERY_MAX_ATTEMPTS`]
pub async fn safe_query<R, T, F, Fut>(handle: &R, op: F) -> Result<T, DbError>
where
    R: RecycleConnection + ?Sized,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    with_retry(handle, QUERY_MAX_ATTEMPTS, op).await
}

/// Write-path policy: [`with_retry`] with [`MUTATION_MAX_ATTEMPTS`].
///
/// Re-running after a statement conflict is safe because the conflict is
/// raised at prepare time, before the statement executes. Operations that
/// issue multiple statements must supply their own transaction so a retry
/// re-runs all of them or none.
pub async fn safe_mutation<R, T, F, Fut>(handle: &R, op: F) -> Result<T, DbError>
where
    R: RecycleConnection + ?Sized,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    with_retry(handle, MUTATION_MAX_ATTEMPTS, op).await
}
