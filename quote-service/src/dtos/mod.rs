pub mod quotes;

pub use quotes::{ApiResponse, CreateQuoteRequest, DeleteResponse, QuoteResponse, TestAiResponse};
