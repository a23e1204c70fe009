//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(String),
    Fail,
    Empty,
}

/// Mock text provider with a fixed outcome and a call counter.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Always returns `text`.
    pub fn responding(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Respond(text.into()))
    }

    /// Always fails as if the API were unreachable.
    pub fn failing() -> Self {
        Self::with_behavior(MockBehavior::Fail)
    }

    /// Always answers with no candidates.
    pub fn empty() -> Self {
        Self::with_behavior(MockBehavior::Empty)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn author(&self) -> &str {
        "Mock AI"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Respond(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::Fail => Err(ProviderError::NetworkError(
                "Mock provider unreachable".to_string(),
            )),
            MockBehavior::Empty => Err(ProviderError::EmptyResponse),
        }
    }
}
