use quote_service::config::QuoteConfig;
use quote_service::services::init_metrics;
use quote_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = QuoteConfig::load()
        .map_err(|e| std::io::Error::other(format!("Configuration error: {}", e)))?;

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing(
        "quote-service",
        &config.common.log_level,
        otlp_endpoint.as_deref(),
    );

    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
