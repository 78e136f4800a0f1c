//! Database error types
//!
//! This module decodes raw sqlx failures into [`DbError`] exactly once, at
//! the point where they are observed. Everything downstream (the retry
//! wrapper, the HTTP boundary, the client policy) works from the structured
//! [`ErrorKind`] this decode produces, never from the raw error text.

use core_kernel::{ErrorKind, SQLSTATE_DUPLICATE_PREPARED_STATEMENT};
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// A prepared-statement name collided on the server side, typically
    /// behind a connection multiplexer without session affinity.
    #[error("Prepared statement conflict: {0}")]
    StatementConflict(String),

    /// No pooled connection became available within the acquire budget
    #[error("Timed out acquiring a connection from the pool")]
    PoolTimedOut,

    /// Engine-reported failure carrying a structured SQLSTATE code
    #[error("Database engine error {code}: {message}")]
    Engine { code: String, message: String },

    /// Driver-layer failure (protocol, I/O, TLS, row decoding) without an
    /// engine code
    #[error("Database driver error: {0}")]
    Driver(String),

    /// Failed to establish the pooled connection handle
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),
}

impl DbError {
    /// The classification of this error in the shared vocabulary
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::StatementConflict(_) => ErrorKind::StatementConflict,
            DbError::PoolTimedOut => ErrorKind::PoolTimeout,
            DbError::Engine { .. } => ErrorKind::Engine,
            DbError::Driver(_) | DbError::ConnectionFailed(_) => ErrorKind::Driver,
        }
    }

    /// Whether the retry wrapper may re-attempt after recycling the
    /// connection. See [`ErrorKind::is_transient`].
    pub fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }

    /// Decodes a structured (code, message) pair reported by the engine.
    ///
    /// Order-sensitive: the prepared-statement check wins over the generic
    /// engine mapping. A missing code with a non-conflicting message is a
    /// driver-layer failure.
    ///
    /// # Arguments
    ///
    /// * `code` - SQLSTATE code, if the engine reported one
    /// * `message` - the raw error message
    pub fn from_engine(code: Option<&str>, message: &str) -> Self {
        if code == Some(SQLSTATE_DUPLICATE_PREPARED_STATEMENT)
            || is_statement_conflict_message(message)
        {
            DbError::StatementConflict(message.to_string())
        } else if let Some(code) = code {
            DbError::Engine {
                code: code.to_string(),
                message: message.to_string(),
            }
        } else {
            DbError::Driver(message.to_string())
        }
    }
}

/// Textual fallback for servers that report a prepared-statement conflict
/// without the `42P05` SQLSTATE code.
fn is_statement_conflict_message(message: &str) -> bool {
    message.to_ascii_lowercase().contains("prepared statement")
}

impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => DbError::PoolTimedOut,
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::from_engine(code.as_deref(), db_err.message())
            }
            other => DbError::Driver(other.to_string()),
        }
    }
}
