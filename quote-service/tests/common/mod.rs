use quote_service::config::{CorsConfig, GeminiSettings, MongoConfig, QuoteConfig};
use quote_service::services::memory::MemoryQuoteStore;
use quote_service::services::providers::mock::MockTextProvider;
use quote_service::services::providers::TextProvider;
use quote_service::services::QuoteStore;
use quote_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub store: Option<Arc<MemoryQuoteStore>>,
    pub provider: Arc<MockTextProvider>,
}

pub fn test_config() -> QuoteConfig {
    QuoteConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            environment: "test".to_string(),
            log_level: "info".to_string(),
        },
        mongodb: MongoConfig {
            uri: None,
            database: "quotes_test".to_string(),
        },
        gemini: GeminiSettings::default(),
        cors: CorsConfig {
            frontend_url: "http://localhost:3000".to_string(),
        },
    }
}

impl TestApp {
    /// Spawn with an in-memory store and a working AI provider.
    pub async fn spawn() -> Self {
        Self::spawn_with(
            Some(Arc::new(MemoryQuoteStore::new())),
            MockTextProvider::responding("You are stronger than you think."),
        )
        .await
    }

    /// Spawn without any database, as when MongoDB was unreachable at startup.
    pub async fn spawn_without_store() -> Self {
        Self::spawn_with(None, MockTextProvider::failing()).await
    }

    pub async fn spawn_with(store: Option<Arc<MemoryQuoteStore>>, provider: MockTextProvider) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with(
            test_config(),
            store.clone().map(|s| s as Arc<dyn QuoteStore>),
            provider.clone() as Arc<dyn TextProvider>,
        )
        .await
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            client,
            store,
            provider,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Response is not JSON");
        (status, body)
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Response is not JSON");
        (status, body)
    }

    pub async fn delete_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Response is not JSON");
        (status, body)
    }

    pub fn store(&self) -> &MemoryQuoteStore {
        self.store.as_deref().expect("Test app has no store")
    }
}
