//! Domain models for the quote service.

pub mod predefined;
pub mod quote;

pub use predefined::{random_predefined, PredefinedQuote, PREDEFINED_QUOTES};
pub use quote::{Quote, QuoteCategory, QuoteDraft, DEFAULT_AUTHOR};
