//! Covidash REST API
//!
//! HTTP API layer for Covidash, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full initial view
//! - `GET /api/v1/summary` - Headline counters
//! - `GET /api/v1/options` - Dropdown option lists
//!
//! ## Charts
//! - `GET /api/v1/charts/line?region=<name>`
//! - `GET /api/v1/charts/bar?regions=<codes>`
//! - `GET /api/v1/charts/pie?regions=<codes>`
//! - `GET /api/v1/charts/map/world`
//! - `GET /api/v1/charts/map/usa`
//!
//! ## Aggregation
//! - `POST /api/v1/aggregate` - Grouped sum over region codes
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Interactive dashboard session
//!
//! # Example
//!
//! ```rust,no_run
//! use covidash::api::{serve, ApiConfig, AppState};
//! use covidash::dashboard::DashboardDefaults;
//! use covidash::dataset::Dataset;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(Dataset::default());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, DashboardDefaults::default(), config.clone());
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

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::initial_view))
        .route("/summary", get(routes::dashboard::summary))
        .route("/options", get(routes::dashboard::options))
        // Chart routes
        .route("/charts/line", get(routes::charts::line))
        .route("/charts/bar", get(routes::charts::bar))
        .route("/charts/pie", get(routes::charts::pie))
        .route("/charts/map/world", get(routes::charts::world_map))
        .route("/charts/map/usa", get(routes::charts::usa_map))
        // Aggregation
        .route("/aggregate", post(routes::aggregate::aggregate_regions));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Covidash listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Covidash shut down gracefully");
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
    use crate::dashboard::DashboardDefaults;
    use crate::dataset::{
        CaseRecord, Dataset, RegionTable, StateCodeLookup, StateRecord, StateTable,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn test_dataset() -> Dataset {
        let day = |d: u32| NaiveDate::from_ymd_opt(2021, 3, d).unwrap();
        let row = |d: u32, code: &str, name: &str, cases: i64| {
            CaseRecord::new(day(d), code, name)
                .continent("Somewhere")
                .new_cases(cases)
                .new_deaths(1)
                .total_deaths(d as i64)
        };

        Dataset::new(
            RegionTable::from_records(vec![
                row(1, "USA", "United States", 100),
                row(2, "USA", "United States", 200),
                row(1, "IND", "India", 50),
                row(1, "MEX", "Mexico", 10),
                row(2, "MEX", "Mexico", 20),
            ]),
            StateTable::from_records(vec![
                StateRecord::new("Texas", 3000, 40),
                StateRecord::new("Ohio", 1500, 20),
                StateRecord::new("Foo", 10, 1),
            ]),
            StateCodeLookup::from_pairs([("Texas", "TX"), ("Ohio", "OH")]),
        )
    }

    fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(test_dataset()),
            DashboardDefaults::default(),
            ApiConfig::default(),
        );
        build_router(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn points(body: &Value) -> &Vec<Value> {
        body["spec"]["series"][0]["points"].as_array().unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get_json("/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = get_json("/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_not_ready_without_data() {
        let app = build_router(AppState::new(
            Arc::new(Dataset::default()),
            DashboardDefaults::default(),
            ApiConfig::default(),
        ));
        let response = app
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dataset"]["regions"], 3);
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_pie_chart_scenario() {
        let (status, body) = get_json("/api/v1/charts/pie?regions=USA,IND,MEX").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"], "pie");

        let slices = points(&body);
        assert_eq!(slices.len(), 3);
        let total: i64 = slices.iter().map(|p| p["y"].as_i64().unwrap()).sum();
        assert_eq!(total, 380);
    }

    #[tokio::test]
    async fn test_bar_chart_without_selection_uses_default() {
        let (_, absent) = get_json("/api/v1/charts/bar").await;
        let (_, empty) = get_json("/api/v1/charts/bar?regions=").await;

        assert_eq!(absent, empty);
        let bars = points(&absent);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0]["x"], "USA");
        assert_eq!(bars[0]["y"], 300);
    }

    #[tokio::test]
    async fn test_bar_chart_unknown_code_is_tolerated() {
        let (status, body) = get_json("/api/v1/charts/bar?regions=IND,XXX").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(points(&body).len(), 1);
    }

    #[tokio::test]
    async fn test_line_chart() {
        let (status, body) = get_json("/api/v1/charts/line?region=Mexico").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"], "line");
        assert_eq!(body["spec"]["series"].as_array().unwrap().len(), 2);
        assert_eq!(points(&body).len(), 2);
    }

    #[tokio::test]
    async fn test_usa_map_drops_unmapped_states() {
        let (status, body) = get_json("/api/v1/charts/map/usa").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(points(&body).len(), 2);
    }

    #[tokio::test]
    async fn test_world_map() {
        let (status, body) = get_json("/api/v1/charts/map/world").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"], "world_map");
        assert_eq!(points(&body).len(), 3);
    }

    #[tokio::test]
    async fn test_summary() {
        let (status, body) = get_json("/api/v1/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cases"]["value"], 380);
        assert_eq!(body["usa_cases"]["formatted"], "4,510");
    }

    #[tokio::test]
    async fn test_options() {
        let (_, body) = get_json("/api/v1/options").await;
        assert_eq!(body["region_codes"].as_array().unwrap().len(), 3);
        assert_eq!(body["region_names"][0], "United States");
    }

    #[tokio::test]
    async fn test_dashboard_view() {
        let (status, body) = get_json("/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["charts"]["pie"]["revision"], 0);
        assert_eq!(body["selection"]["line_region"], "United States");
    }

    #[tokio::test]
    async fn test_aggregate() {
        let (status, body) = post_json(
            "/api/v1/aggregate",
            r#"{"regions": ["USA", "IND", "MEX"], "metric": "new_cases"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 380);
        assert_eq!(body["values"][0]["code"], "IND");
        assert_eq!(body["values"][0]["value"], 50);
    }

    #[tokio::test]
    async fn test_aggregate_empty_filter() {
        let (status, body) = post_json("/api/v1/aggregate", r#"{"regions": []}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["values"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_invalid_metric() {
        let (status, body) = post_json(
            "/api/v1/aggregate",
            r#"{"regions": ["USA"], "metric": "recoveries"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_aggregate_invalid_json() {
        let (status, _) = post_json("/api/v1/aggregate", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_json("/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
