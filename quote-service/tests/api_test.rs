mod common;

use common::TestApp;
use quote_service::models::PREDEFINED_QUOTES;
use quote_service::services::memory::MemoryQuoteStore;
use quote_service::services::providers::mock::MockTextProvider;
use reqwest::StatusCode;
use serde_json::json;
use service_core::middleware::REQUEST_ID_HEADER;
use std::sync::Arc;

fn is_predefined(quote: &serde_json::Value) -> bool {
    PREDEFINED_QUOTES
        .iter()
        .any(|p| quote["text"] == p.text && quote["author"] == p.author)
}

#[tokio::test]
async fn health_check_reports_database_state() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn index_lists_endpoints() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Mental Health Quotes API");
    assert_eq!(body["endpoints"]["todayQuote"], "/api/quotes/today");
}

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/metrics"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn cors_preflight_allows_frontend_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/quotes/today"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn today_quote_is_generated_once_and_cached() {
    let app = TestApp::spawn().await;

    let (status, first) = app.get_json("/api/quotes/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["data"]["text"], "You are stronger than you think.");
    assert_eq!(first["data"]["author"], "Mock AI");
    assert_eq!(first["data"]["category"], "mental-health");
    assert_eq!(first["data"]["isDailyQuote"], true);

    let (_, second) = app.get_json("/api/quotes/today").await;
    assert_eq!(second["data"]["_id"], first["data"]["_id"]);

    assert_eq!(app.provider.calls(), 1);
    assert_eq!(app.store().writes(), 1);
}

#[tokio::test]
async fn today_quote_date_is_midnight_utc() {
    let app = TestApp::spawn().await;

    let (_, body) = app.get_json("/api/quotes/today").await;

    let date = body["data"]["date"].as_str().unwrap();
    assert!(date.ends_with("T00:00:00.000Z"), "unexpected date {}", date);
}

#[tokio::test]
async fn ai_failure_stores_predefined_quote() {
    let store = Arc::new(MemoryQuoteStore::new());
    let app = TestApp::spawn_with(Some(store), MockTextProvider::failing()).await;

    let (status, body) = app.get_json("/api/quotes/today").await;

    assert_eq!(status, StatusCode::OK);
    assert!(is_predefined(&body["data"]));
    assert_eq!(app.store().writes(), 1);
}

#[tokio::test]
async fn store_failure_still_serves_a_quote() {
    let store = Arc::new(MemoryQuoteStore::new());
    store.set_fail_reads(true);
    let app = TestApp::spawn_with(Some(store), MockTextProvider::responding("Unused.")).await;

    let (status, body) = app.get_json("/api/quotes/today").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(is_predefined(&body["data"]));
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn deleting_today_quote_forces_a_new_one() {
    let app = TestApp::spawn().await;

    let (_, first) = app.get_json("/api/quotes/today").await;

    let (status, deleted) = app.delete_json("/api/quotes/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["deleted"], 1);

    let (_, second) = app.get_json("/api/quotes/today").await;
    assert_ne!(second["data"]["_id"], first["data"]["_id"]);
    assert_eq!(app.provider.calls(), 2);
}

#[tokio::test]
async fn deleting_with_nothing_stored_reports_zero() {
    let app = TestApp::spawn().await;

    let (status, body) = app.delete_json("/api/quotes/today").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 0);
}

#[tokio::test]
async fn random_quote_is_predefined() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/api/quotes/random").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(is_predefined(&body["data"]));
    assert!(app.store().is_empty().await);
}

#[tokio::test]
async fn test_ai_reports_generated_quote() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/api/quotes/test-ai").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["isAI"], true);
    assert_eq!(body["data"]["text"], "You are stronger than you think.");
    assert!(app.store().is_empty().await);
}

#[tokio::test]
async fn test_ai_falls_back_when_provider_fails() {
    let store = Arc::new(MemoryQuoteStore::new());
    let app = TestApp::spawn_with(Some(store), MockTextProvider::empty()).await;

    let (status, body) = app.get_json("/api/quotes/test-ai").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["isAI"], false);
    assert!(is_predefined(&body["data"]));
}

#[tokio::test]
async fn create_quote_applies_defaults() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json(
            "/api/quotes",
            &json!({ "text": "Breathe.", "category": "motivation" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["text"], "Breathe.");
    assert_eq!(body["data"]["author"], "Anonymous");
    assert_eq!(body["data"]["category"], "motivation");
    assert_eq!(body["data"]["isDailyQuote"], false);
    assert_eq!(app.store().writes(), 1);
}

#[tokio::test]
async fn create_quote_without_text_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json("/api/quotes", &json!({ "author": "Someone" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Quote text is required");
    assert_eq!(app.store().writes(), 0);
}

#[tokio::test]
async fn create_quote_with_blank_text_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, _) = app.post_json("/api/quotes", &json!({ "text": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store().writes(), 0);
}

#[tokio::test]
async fn create_quote_with_unknown_category_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json("/api/quotes", &json!({ "text": "Hi", "category": "sports" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.store().writes(), 0);
}

#[tokio::test]
async fn create_quote_with_overlong_text_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json("/api/quotes", &json!({ "text": "a".repeat(1001) }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/quotes"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_quote_write_failure_returns_500_envelope() {
    let store = Arc::new(MemoryQuoteStore::new());
    store.set_fail_writes(true);
    let app = TestApp::spawn_with(Some(store), MockTextProvider::failing()).await;

    let (status, body) = app
        .post_json("/api/quotes", &json!({ "text": "Breathe." }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error adding quote");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn all_quotes_are_newest_first() {
    let app = TestApp::spawn().await;

    app.post_json("/api/quotes", &json!({ "text": "First." })).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    app.post_json("/api/quotes", &json!({ "text": "Second." })).await;

    let (status, body) = app.get_json("/api/quotes/all").await;

    assert_eq!(status, StatusCode::OK);
    let quotes = body["data"].as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0]["text"], "Second.");
    assert_eq!(quotes[1]["text"], "First.");
}

#[tokio::test]
async fn without_database_reads_degrade_to_predefined() {
    let app = TestApp::spawn_without_store().await;

    let (_, health) = app.get_json("/api/health").await;
    assert_eq!(health["database"], "disconnected");

    let (status, today) = app.get_json("/api/quotes/today").await;
    assert_eq!(status, StatusCode::OK);
    assert!(is_predefined(&today["data"]));
    assert_eq!(app.provider.calls(), 0);

    let (status, all) = app.get_json("/api/quotes/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["data"], json!([]));
}

#[tokio::test]
async fn without_database_writes_fail() {
    let app = TestApp::spawn_without_store().await;

    let (status, body) = app
        .post_json("/api/quotes", &json!({ "text": "Breathe." }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error adding quote");

    let (status, body) = app.delete_json("/api/quotes/today").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error deleting today's quote");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/health"))
        .header(REQUEST_ID_HEADER, "req-123")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");

    let response = app
        .client
        .get(app.url("/api/health"))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(!response.headers()[REQUEST_ID_HEADER].is_empty());
}
