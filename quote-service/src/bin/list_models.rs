//! Lists the Gemini models available to the configured API key.

use quote_service::config::QuoteConfig;
use quote_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match QuoteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let provider = match GeminiTextProvider::new(GeminiConfig {
        api_key: config.gemini.api_key.clone(),
        model: config.gemini.model.clone(),
        api_base: config.gemini.api_base.clone(),
        timeout: Duration::from_secs(config.gemini.timeout_secs),
    }) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Failed to create Gemini client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !provider.is_configured() {
        eprintln!("GEMINI_API_KEY is not set");
        return ExitCode::FAILURE;
    }

    println!("Fetching available models for your Gemini API key...");

    match provider.list_models().await {
        Ok(models) => {
            println!("Available models:");
            for model in models {
                let methods = if model.supported_generation_methods.is_empty() {
                    "None".to_string()
                } else {
                    model.supported_generation_methods.join(", ")
                };
                println!(
                    "- {} (displayName: {})",
                    model.name,
                    model.display_name.as_deref().unwrap_or("-")
                );
                println!("  Supported methods: {}", methods);
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch models: {}", e);
            ExitCode::FAILURE
        }
    }
}
