//! Sensordeck REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Measurements
//! - `GET /api/measurements` - Range-filtered, paginated readings
//! - `GET /api/measurements/metrics` - Summary statistics
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## Dashboard
//! - Static files under `public/` served at the root
//!
//! # Example
//!
//! ```rust,ignore
//! use sensordeck::api::{build_router, serve, ApiConfig, AppState};
//! use sensordeck::query::QueryEngine;
//! use sensordeck::store::{JsonStore, StoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(JsonStore::open(StoreConfig::default()).await?);
//!     let engine = Arc::new(QueryEngine::new(store.clone()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, engine, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/measurements", get(routes::measurements::list_measurements))
        .route(
            "/measurements/metrics",
            get(routes::measurements::measurement_metrics),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let public_dir = state.config.public_dir.clone();
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sensordeck API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sensordeck API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{ListResponse, MetricsResponse};
    use crate::query::QueryEngine;
    use crate::store::{JsonStore, Reading, ReadingStore, StoreConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    async fn create_test_app(readings: Vec<Reading>) -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(
            JsonStore::open(StoreConfig::new(dir.path()))
                .await
                .unwrap(),
        );
        store.insert_many(readings).await.unwrap();

        let engine = Arc::new(QueryEngine::new(store.clone() as Arc<dyn ReadingStore>));
        let state = AppState::new(store, engine, ApiConfig::default());

        (build_router(state), dir)
    }

    fn day_millis(day: u32) -> i64 {
        chrono::NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn seeded() -> Vec<Reading> {
        (1..=5)
            .map(|i| Reading::new(day_millis(i), (i as f64) * 10.0, i as f64, 0.0))
            .collect()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_list_measurements_ok() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(app, "/api/measurements?field=field1").await;
        assert_eq!(status, StatusCode::OK);

        let response: ListResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.field, "field1");
        assert_eq!(response.total, 5);
        assert_eq!(response.data.len(), 5);
        assert!(response.data.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[tokio::test]
    async fn test_list_measurements_paginated() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(app, "/api/measurements?field=field1&page=1&limit=2").await;
        assert_eq!(status, StatusCode::OK);

        let response: ListResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.total, 5);
        assert_eq!(response.page, 1);
        assert_eq!(response.limit, 2);
        let values: Vec<f64> = response.data.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![10.0, 20.0]);
    }

    #[tokio::test]
    async fn test_list_measurements_date_range() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(
            app,
            "/api/measurements?field=field1&start_date=2024-01-02&end_date=2024-01-04",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: ListResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.total, 3);
    }

    #[tokio::test]
    async fn test_list_measurements_missing_field() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(app, "/api/measurements").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            error["error"],
            "Invalid or missing field (field1/field2/field3)"
        );
    }

    #[tokio::test]
    async fn test_list_measurements_half_range() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) =
            get(app, "/api/measurements?field=field1&start_date=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"], "Provide both start_date and end_date");
    }

    #[tokio::test]
    async fn test_list_measurements_bad_date() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, _) = get(
            app,
            "/api/measurements?field=field1&start_date=01-01-2024&end_date=2024-01-05",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_measurements_empty_range_is_404() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(
            app,
            "/api/measurements?field=field1&start_date=2030-01-01&end_date=2030-01-02",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"], "No data found for this range/field");
    }

    #[tokio::test]
    async fn test_metrics_known_statistics() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, body) = get(app, "/api/measurements/metrics?field=field1").await;
        assert_eq!(status, StatusCode::OK);

        let response: MetricsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.count, 5);
        assert_eq!(response.average, 30.0);
        assert_eq!(response.min, 10.0);
        assert_eq!(response.max, 50.0);
        assert!((response.std_dev - 200.0_f64.sqrt()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_metrics_no_values_is_404() {
        let (app, _dir) = create_test_app(vec![]).await;

        let (status, body) = get(app, "/api/measurements/metrics?field=field2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"], "No values found for metrics");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _dir) = create_test_app(seeded()).await;

        let (status, _) = get(app.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["readings"], 5);
    }
}
