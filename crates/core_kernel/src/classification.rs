//! Error classification vocabulary
//!
//! A raw database failure is decoded into an [`ErrorKind`] exactly once, at
//! the layer that observed it. Every downstream decision — whether the retry
//! wrapper re-attempts, which HTTP status the boundary returns, whether the
//! client re-issues a request — is a pure function over this enumeration, so
//! no string or prefix matching leaks past the decode step.

use serde::{Deserialize, Serialize};

/// SQLSTATE code PostgreSQL raises when a prepared statement name collides,
/// typically behind a connection multiplexer without session affinity.
pub const SQLSTATE_DUPLICATE_PREPARED_STATEMENT: &str = "42P05";

/// Classification of a database failure
///
/// Shared by the server-side retry wrapper, the HTTP error classifier, and
/// the client-side query policy so all three speak the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Prepared-statement conflict - a cached query plan identifier collided
    /// on the server side. Recoverable by recycling the connection.
    StatementConflict,
    /// Failed to acquire a pooled connection within the configured budget.
    PoolTimeout,
    /// Driver-layer failure (protocol, I/O, TLS, decoding) with no
    /// engine-reported SQLSTATE code.
    Driver,
    /// Engine-reported failure carrying a structured SQLSTATE code.
    Engine,
    /// Anything that could not be classified.
    Unclassified,
}

impl ErrorKind {
    /// Whether this kind is safe to retry after corrective action
    /// (reconnect) without risking duplicated side effects.
    ///
    /// Only prepared-statement conflicts qualify: they are raised at prepare
    /// time, before the statement runs. Pool timeouts are deliberately not
    /// transient here - retrying them server-side compounds load on an
    /// already-saturated pool.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::StatementConflict)
    }

    /// Stable string form used in logs and serialized policy decisions
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StatementConflict => "statement_conflict",
            ErrorKind::PoolTimeout => "pool_timeout",
            ErrorKind::Driver => "driver",
            ErrorKind::Engine => "engine",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
