use crate::models::{Quote, QuoteCategory, QuoteDraft};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: QuoteCategory,
    pub date: String,
    pub is_daily_quote: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
            author: quote.author,
            category: quote.category,
            date: quote.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            is_daily_quote: quote.is_daily_quote,
            created_at: quote.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: quote.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestAiResponse {
    pub success: bool,
    pub message: String,
    pub data: QuoteDraft,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(max = 1000, message = "Quote text must be at most 1000 characters"))]
    pub text: Option<String>,
    #[validate(length(max = 200, message = "Author must be at most 200 characters"))]
    pub author: Option<String>,
    pub category: Option<String>,
}
