//! Daily quote selection with layered fallback.
//!
//! Read paths always produce a quote: a stored record for today, else a fresh
//! AI quote, else a predefined one. Only the admin write paths report errors.

use super::metrics::{record_ai_generation, record_quote_served, QuoteSource};
use super::providers::{GenerationParams, TextProvider};
use super::store::{DayRange, QuoteStore};
use crate::models::{random_predefined, Quote, QuoteCategory, QuoteDraft};
use service_core::error::AppError;
use std::sync::Arc;

const QUOTE_PROMPT: &str = "Write one short, encouraging quote about mental health or men's \
mental health for someone going through a hard time. Draw on themes of resilience, hope and \
self-care. Reply with the quote text only, with no attribution, formatting or explanation.";

/// Sampling parameters used for every quote generation request.
pub fn quote_generation_params() -> GenerationParams {
    GenerationParams {
        temperature: Some(0.7),
        top_k: Some(40),
        top_p: Some(0.95),
        max_tokens: Some(100),
    }
}

#[derive(Clone)]
pub struct QuoteService {
    store: Option<Arc<dyn QuoteStore>>,
    text_provider: Arc<dyn TextProvider>,
}

impl QuoteService {
    /// `store` is `None` when the database could not be reached at startup.
    pub fn new(store: Option<Arc<dyn QuoteStore>>, text_provider: Arc<dyn TextProvider>) -> Self {
        Self {
            store,
            text_provider,
        }
    }

    pub fn store_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn random_predefined_quote(&self) -> QuoteDraft {
        random_predefined()
    }

    /// Ask the provider for a quote. Any failure yields `None`.
    pub async fn generate_ai_quote(&self) -> Option<QuoteDraft> {
        let result = self
            .text_provider
            .generate(QUOTE_PROMPT, &quote_generation_params())
            .await;

        let draft = match result {
            Ok(response) => {
                let text = strip_wrapping_quotes(&response.text);
                if text.is_empty() {
                    tracing::warn!("AI provider returned only punctuation");
                    None
                } else {
                    tracing::info!(
                        input_tokens = response.input_tokens,
                        output_tokens = response.output_tokens,
                        finish_reason = ?response.finish_reason,
                        "Generated AI quote"
                    );
                    Some(QuoteDraft {
                        text: text.to_string(),
                        author: self.text_provider.author().to_string(),
                        category: QuoteCategory::MentalHealth,
                    })
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI quote generation failed, falling back");
                None
            }
        };

        record_ai_generation(draft.is_some());
        draft
    }

    /// Today's quote, creating and storing one on the first request of the day.
    ///
    /// Two concurrent first requests can both miss the lookup and each store
    /// a daily quote; there is no uniqueness constraint to stop it.
    pub async fn get_today_quote(&self) -> Quote {
        let day = DayRange::today();

        let Some(store) = &self.store else {
            record_quote_served(QuoteSource::Fallback);
            return Quote::daily(random_predefined(), day.start);
        };

        match self.find_or_create_daily(store.as_ref(), day).await {
            Ok((quote, source)) => {
                record_quote_served(source);
                quote
            }
            Err(e) => {
                tracing::error!(error = %e, "Error getting today's quote, serving predefined quote");
                record_quote_served(QuoteSource::Fallback);
                Quote::daily(random_predefined(), day.start)
            }
        }
    }

    async fn find_or_create_daily(
        &self,
        store: &dyn QuoteStore,
        day: DayRange,
    ) -> Result<(Quote, QuoteSource), AppError> {
        if let Some(existing) = store.find_daily(day).await? {
            return Ok((existing, QuoteSource::Cached));
        }

        let (draft, source) = match self.generate_ai_quote().await {
            Some(draft) => (draft, QuoteSource::Ai),
            None => (random_predefined(), QuoteSource::Predefined),
        };

        let mut quote = Quote::daily(draft, day.start);
        quote.touch();
        store.insert(&quote).await?;

        tracing::info!(
            quote_id = %quote.id,
            source = source.as_str(),
            "Stored today's quote"
        );
        Ok((quote, source))
    }

    /// All stored quotes, newest first. Store failures yield an empty list.
    pub async fn get_all_quotes(&self) -> Vec<Quote> {
        let Some(store) = &self.store else {
            return Vec::new();
        };

        match store.list_all().await {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::error!(error = %e, "Error getting all quotes");
                Vec::new()
            }
        }
    }

    /// Store an ad-hoc, non-daily quote. `text` must already be validated.
    pub async fn add_quote(
        &self,
        text: String,
        author: Option<String>,
        category: Option<QuoteCategory>,
    ) -> Result<Quote, AppError> {
        let store = self.store.as_ref().ok_or(AppError::DatabaseUnavailable)?;

        let mut quote = Quote::manual(text, author, category);
        quote.touch();
        store.insert(&quote).await?;

        tracing::info!(quote_id = %quote.id, category = %quote.category, "Added quote");
        Ok(quote)
    }

    /// Delete today's daily quote(s) so the next request generates a new one.
    pub async fn delete_today_quote(&self) -> Result<u64, AppError> {
        let store = self.store.as_ref().ok_or(AppError::DatabaseUnavailable)?;

        let deleted = store.delete_daily(DayRange::today()).await?;
        tracing::info!(deleted, "Deleted today's quote");
        Ok(deleted)
    }
}

fn strip_wrapping_quotes(text: &str) -> &str {
    text.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\u{201C}' | '\u{201D}'))
        .trim()
}
