//! HTTP API Layer
//!
//! This crate provides the HTTP boundary of the menu platform's data-access
//! subsystem using Axum.
//!
//! # Architecture
//!
//! - **Error Handling**: every error propagated out of a handler terminates
//!   here, classified into a `{ "error": message }` response with a 503/500
//!   status; detail is logged server-side only
//! - **Localization**: client-facing messages are resolved from embedded
//!   fluent bundles against the request's `Accept-Language`
//! - **Middleware**: request ids, tracing, request logging
//! - **Handlers**: liveness, readiness, and pool diagnostics
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(db, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod l10n;
pub mod middleware;

use axum::{middleware as axum_middleware, routing::get, Router};
use infra_db::Db;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::health;
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: &'static Db,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `db` - The process-wide database handle
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(db: &'static Db, config: ApiConfig) -> Router {
    let state = AppState { db, config };

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/db", get(health::db_stats))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
