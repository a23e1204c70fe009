//! AI provider abstractions and implementations.
//!
//! The quote service only needs single-shot text completion, so providers
//! expose one `generate` call plus a display name used as the quote author.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, already trimmed and non-empty.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Sampling parameters for a completion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Top-k sampling.
    pub top_k: Option<i32>,

    /// Top-p sampling.
    pub top_p: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Name recorded as the author of generated quotes.
    fn author(&self) -> &str;

    /// Generate a text completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
