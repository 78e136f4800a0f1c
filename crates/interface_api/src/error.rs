//! API error handling
//!
//! The single terminal point of the request pipeline: any error propagated
//! out of a handler is converted into a client-safe `{ "error": message }`
//! response here, and never re-thrown. Full detail is logged server-side;
//! the response carries only a generic, localized message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_kernel::ErrorKind;
use infra_db::DbError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use unic_langid::LanguageIdentifier;

use crate::l10n::LOCALIZER;

/// Message keys resolved against the negotiated locale
pub const MSG_STATEMENT_CONFLICT: &str = "error-statement-conflict";
pub const MSG_POOL_TIMEOUT: &str = "error-pool-timeout";
pub const MSG_DATABASE: &str = "error-database";
pub const MSG_INTERNAL: &str = "error-internal";

/// Every message key the boundary can emit
pub const MESSAGE_KEYS: &[&str] = &[
    MSG_STATEMENT_CONFLICT,
    MSG_POOL_TIMEOUT,
    MSG_DATABASE,
    MSG_INTERNAL,
];

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The classification of this error in the shared vocabulary
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Db(db) => db.kind(),
            ApiError::Internal(_) => ErrorKind::Unclassified,
        }
    }

    /// Binds the response to the request's negotiated locale
    pub fn with_locale(self, locale: LanguageIdentifier) -> LocalizedError {
        LocalizedError {
            error: self,
            locale,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Db(DbError::from(err))
    }
}

/// Ordered classification table, first match wins:
///
/// 1. prepared-statement conflict -> 503, connection-error message
/// 2. pool-acquisition timeout    -> 503, temporarily-unavailable message
/// 3. driver-layer error          -> 500, database-error message
/// 4. engine-reported error       -> 500, database-error message
/// 5. anything else               -> 500, internal-error message
///
/// Total over [`ErrorKind`]: every kind maps to a status in {503, 500}.
pub fn classify(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::StatementConflict => (StatusCode::SERVICE_UNAVAILABLE, MSG_STATEMENT_CONFLICT),
        ErrorKind::PoolTimeout => (StatusCode::SERVICE_UNAVAILABLE, MSG_POOL_TIMEOUT),
        ErrorKind::Driver => (StatusCode::INTERNAL_SERVER_ERROR, MSG_DATABASE),
        ErrorKind::Engine => (StatusCode::INTERNAL_SERVER_ERROR, MSG_DATABASE),
        ErrorKind::Unclassified => (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL),
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An [`ApiError`] bound to a negotiated locale
pub struct LocalizedError {
    error: ApiError,
    locale: LanguageIdentifier,
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        respond(self.error, &self.locale)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let locale = LOCALIZER.default_locale();
        respond(self, &locale)
    }
}

fn respond(error: ApiError, locale: &LanguageIdentifier) -> Response {
    let kind = error.kind();
    let (status, key) = classify(kind);

    // Full detail stays server-side; engine failures also log their code
    match &error {
        ApiError::Db(DbError::Engine { code, message }) => {
            error!(kind = %kind, code = %code, error = %message, "Request failed at database boundary");
        }
        ApiError::Db(db) => {
            error!(kind = %kind, error = %db, "Request failed at database boundary");
        }
        ApiError::Internal(message) => {
            error!(kind = %kind, error = %message, "Request failed");
        }
    }

    let body = ErrorResponse {
        error: LOCALIZER.message(locale, key),
    };
    (status, Json(body)).into_response()
}
