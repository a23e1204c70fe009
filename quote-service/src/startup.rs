//! Application startup and lifecycle management.

use crate::config::{MongoConfig, QuoteConfig};
use crate::handlers::{self, quotes};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{QuoteDb, QuoteService, QuoteStore};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    catch_panic_layer, http_trace_layer, metrics_middleware, request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: QuoteConfig,
    pub quotes: QuoteService,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let expose_details = state.config.expose_error_details();
    let cors = cors_layer(&state.config.cors.frontend_url);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/quotes", post(quotes::create_quote))
        .route(
            "/api/quotes/today",
            get(quotes::get_today_quote).delete(quotes::delete_today_quote),
        )
        .route("/api/quotes/test-ai", get(quotes::test_ai_quote))
        .route("/api/quotes/random", get(quotes::random_quote))
        .route("/api/quotes/all", get(quotes::all_quotes))
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(catch_panic_layer(expose_details))
        .layer(cors)
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = [frontend_url, "http://localhost:3000", "http://127.0.0.1:3000"]
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin: {}", e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Connect to MongoDB, or return `None` so the service runs on predefined quotes.
async fn connect_store(config: &MongoConfig) -> Option<Arc<dyn QuoteStore>> {
    let Some(uri) = config.uri.as_deref() else {
        tracing::warn!("MONGODB_URI not set - continuing without database, using predefined quotes only");
        return None;
    };

    match QuoteDb::connect(uri, &config.database).await {
        Ok(db) => {
            if let Err(e) = db.initialize_indexes().await {
                tracing::warn!(error = %e, "Failed to initialize database indexes");
            }
            Some(Arc::new(db))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Error connecting to MongoDB - continuing without database, using predefined quotes only"
            );
            None
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Build the application, connecting to MongoDB and Gemini as configured.
    pub async fn build(config: QuoteConfig) -> Result<Self, AppError> {
        let store = connect_store(&config.mongodb).await;

        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e.to_string())))?;

        if provider.is_configured() {
            tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");
        } else {
            tracing::warn!(
                "Gemini API key not configured (GEMINI_API_KEY or Gemini_API_KEY) - serving predefined quotes only"
            );
        }

        Self::build_with(config, store, Arc::new(provider)).await
    }

    /// Build the application around an existing store and provider.
    pub async fn build_with(
        config: QuoteConfig,
        store: Option<Arc<dyn QuoteStore>>,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            quotes: QuoteService::new(store, text_provider),
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = %config.common.environment,
            database = state.quotes.store_connected(),
            "Quote service listening"
        );

        Ok(Self {
            port,
            listener,
            router: router(state.clone()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve requests until Ctrl-C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
