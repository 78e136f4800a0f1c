//! Client-side retry rules
//!
//! These decide whether a failed fetch or mutation is re-issued from the
//! client, using the same [`ErrorKind`] vocabulary the server-side wrapper
//! classifies with. The server never retries pool timeouts; the client may,
//! from outside the saturated pool, with capped exponential backoff.

use std::time::Duration;

use core_kernel::ErrorKind;

/// First backoff step
const BACKOFF_BASE: Duration = Duration::from_millis(1000);

/// Backoff ceiling
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Per-kind retry budgets for client-issued operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pool_timeout_retries: u32,
    statement_conflict_retries: u32,
    default_retries: u32,
}

impl RetryPolicy {
    /// Read-path rules: pool timeouts are worth a couple of re-issues once
    /// the pool has had a moment to drain, statement conflicts usually clear
    /// after one, anything else gets the generic budget.
    pub fn reads() -> Self {
        Self {
            pool_timeout_retries: 2,
            statement_conflict_retries: 1,
            default_retries: 3,
        }
    }

    /// Write-path rules: under at-least-once semantics a re-issued mutation
    /// can duplicate side effects, so pool timeouts and statement conflicts
    /// are never re-issued and everything else gets a single retry.
    pub fn writes() -> Self {
        Self {
            pool_timeout_retries: 0,
            statement_conflict_retries: 0,
            default_retries: 1,
        }
    }

    /// Retry budget for a failure of the given kind
    pub fn max_retries(&self, kind: ErrorKind) -> u32 {
        match kind {
            ErrorKind::PoolTimeout => self.pool_timeout_retries,
            ErrorKind::StatementConflict => self.statement_conflict_retries,
            ErrorKind::Driver | ErrorKind::Engine | ErrorKind::Unclassified => {
                self.default_retries
            }
        }
    }

    /// Whether an operation that has already failed `failure_count` times,
    /// most recently with `kind`, should be re-issued
    pub fn should_retry(&self, failure_count: u32, kind: ErrorKind) -> bool {
        failure_count < self.max_retries(kind)
    }

    /// Delay before re-issue number `attempt_index` (0-indexed):
    /// `min(1000ms * 2^attempt_index, 30s)`
    pub fn delay(attempt_index: u32) -> Duration {
        BACKOFF_BASE
            .saturating_mul(2u32.saturating_pow(attempt_index))
            .min(BACKOFF_CAP)
    }
}
