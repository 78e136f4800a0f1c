//! Flaky-operation builders and recycle probes
//!
//! These exercise the retry wrapper without a live database: a [`FlakyOp`]
//! fails a configured number of times before succeeding while counting
//! attempts, and a [`RecycleProbe`] stands in for the connection handle to
//! count recycle calls.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use infra_db::{DbError, RecycleConnection};

/// An operation that fails `fail_times` times with a fabricated error, then
/// succeeds, counting every attempt
pub struct FlakyOp {
    attempts: AtomicU32,
    fail_times: u32,
    error: Arc<dyn Fn() -> DbError + Send + Sync>,
}

impl FlakyOp {
    /// Creates an operation that fails `fail_times` times with errors
    /// produced by `error` before succeeding
    pub fn failing(fail_times: u32, error: impl Fn() -> DbError + Send + Sync + 'static) -> Self {
        Self {
            attempts: AtomicU32::new(0),
            fail_times,
            error: Arc::new(error),
        }
    }

    /// An operation that succeeds on the first attempt
    pub fn succeeding() -> Self {
        Self::failing(0, || DbError::Driver("unreachable".to_string()))
    }

    /// Number of attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Runs one attempt
    pub async fn call(&self) -> Result<&'static str, DbError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.fail_times {
            Err((self.error)())
        } else {
            Ok("ok")
        }
    }
}

/// A recycle seam that only counts invocations
#[derive(Default)]
pub struct RecycleProbe {
    recycles: AtomicU32,
}

impl RecycleProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recycle calls observed
    pub fn recycle_count(&self) -> u32 {
        self.recycles.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecycleConnection for RecycleProbe {
    async fn recycle(&self) {
        self.recycles.fetch_add(1, Ordering::SeqCst);
    }
}
