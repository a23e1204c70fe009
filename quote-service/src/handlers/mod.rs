//! HTTP handlers for the quote service.

pub mod health;
pub mod quotes;

pub use health::{health_check, index, metrics_endpoint, not_found};
