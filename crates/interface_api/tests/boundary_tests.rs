//! Tests for the HTTP error boundary
//!
//! Each route throws one class of error; the assertions pin the status,
//! the localized body, and that no raw driver detail crosses the boundary.

use axum::http::{header, HeaderValue, StatusCode};
use axum::{routing::get, Router};
use axum_test::TestServer;
use interface_api::error::{ApiError, LocalizedError};
use interface_api::l10n::Locale;
use serde_json::Value;
use test_utils::{driver_error, engine_error, pool_timeout, statement_conflict};

async fn conflict(locale: Locale) -> Result<(), LocalizedError> {
    Err(ApiError::from(statement_conflict()).with_locale(locale.0))
}

async fn timed_out(locale: Locale) -> Result<(), LocalizedError> {
    Err(ApiError::from(pool_timeout()).with_locale(locale.0))
}

fn boundary_router() -> Router {
    Router::new()
        .route("/conflict", get(conflict))
        .route("/pool-timeout", get(timed_out))
        .route(
            "/engine",
            get(|| async { Err::<(), ApiError>(ApiError::from(engine_error("23505"))) }),
        )
        .route(
            "/driver",
            get(|| async { Err::<(), ApiError>(ApiError::from(driver_error())) }),
        )
        .route(
            "/unclassified",
            get(|| async {
                Err::<(), ApiError>(ApiError::Internal("template render failed".to_string()))
            }),
        )
}

fn server() -> TestServer {
    TestServer::new(boundary_router()).expect("failed to build test server")
}

#[tokio::test]
async fn test_statement_conflict_maps_to_503() {
    let response = server().get("/conflict").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Database connection error.");
}

#[tokio::test]
async fn test_pool_timeout_maps_to_503() {
    let response = server().get("/pool-timeout").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Service temporarily unavailable, please retry.");
}

#[tokio::test]
async fn test_engine_error_maps_to_opaque_500() {
    let response = server().get("/engine").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Database error.");
}

#[tokio::test]
async fn test_driver_error_maps_to_opaque_500() {
    let response = server().get("/driver").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Database error.");
}

#[tokio::test]
async fn test_unclassified_maps_to_internal_500() {
    let response = server().get("/unclassified").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error.");
}

#[tokio::test]
async fn test_raw_detail_never_crosses_the_boundary() {
    for (path, leaks) in [
        ("/conflict", vec!["42P05", "prepared statement", "s0"]),
        ("/engine", vec!["23505", "engine reported"]),
        ("/driver", vec!["connection reset"]),
        ("/unclassified", vec!["template render failed"]),
    ] {
        let text = server().get(path).await.text();
        for leak in leaks {
            assert!(
                !text.to_lowercase().contains(&leak.to_lowercase()),
                "{path} leaked {leak:?}: {text}"
            );
        }
    }
}

#[tokio::test]
async fn test_messages_follow_accept_language() {
    let response = server()
        .get("/conflict")
        .add_header(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-ES,es;q=0.9,en;q=0.5"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error de conexión con la base de datos.");
}

#[tokio::test]
async fn test_unsupported_language_falls_back_to_english() {
    let response = server()
        .get("/pool-timeout")
        .add_header(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("fr-FR,fr;q=0.9"),
        )
        .await;

    let body: Value = response.json();
    assert_eq!(body["error"], "Service temporarily unavailable, please retry.");
}
