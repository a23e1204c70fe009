use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use service_core::error::ErrorResponse;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = if state.quotes.store_connected() {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "database": database
    }))
}

pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Mental Health Quotes API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "todayQuote": "/api/quotes/today",
            "randomQuote": "/api/quotes/random",
            "allQuotes": "/api/quotes/all",
            "addQuote": "/api/quotes (POST)",
            "testAI": "/api/quotes/test-ai",
            "metrics": "/metrics"
        }
    }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found", None)),
    )
}
