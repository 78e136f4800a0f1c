//! Canned classified errors
//!
//! Constructors for each error class the decode step can produce, built
//! through the same decode path production uses.

use infra_db::DbError;

/// A prepared-statement conflict as PostgreSQL reports it behind a
/// connection multiplexer (SQLSTATE 42P05)
pub fn statement_conflict() -> DbError {
    DbError::from_engine(Some("42P05"), r#"prepared statement "s0" already exists"#)
}

/// A pool-acquisition timeout
pub fn pool_timeout() -> DbError {
    DbError::PoolTimedOut
}

/// An engine-reported error with the given SQLSTATE code
pub fn engine_error(code: &str) -> DbError {
    DbError::from_engine(Some(code), "engine reported an error")
}

/// A driver-layer failure without an engine code
pub fn driver_error() -> DbError {
    DbError::Driver("connection reset by peer".to_string())
}
