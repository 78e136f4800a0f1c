//! Health check handlers

use axum::{extract::State, Json};
use infra_db::{safe_query, DbError, PoolStats};
use serde::Serialize;

use crate::error::{ApiError, LocalizedError};
use crate::l10n::Locale;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes database)
pub async fn readiness_check(
    State(state): State<AppState>,
    locale: Locale,
) -> Result<Json<HealthResponse>, LocalizedError> {
    let db = state.db;

    // The probe goes through the read-path retry policy so a transient
    // statement conflict does not flap readiness
    safe_query(db, || async move {
        sqlx::query("SELECT 1")
            .fetch_one(&db.pool())
            .await
            .map(|_| ())
            .map_err(DbError::from)
    })
    .await
    .map_err(|error| ApiError::from(error).with_locale(locale.0))?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Connection pool occupancy (diagnostic)
pub async fn db_stats(State(state): State<AppState>) -> Json<PoolStats> {
    Json(state.db.stats())
}
