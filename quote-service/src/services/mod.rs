pub mod database;
pub mod memory;
pub mod metrics;
pub mod providers;
pub mod quote_service;
pub mod store;

pub use database::QuoteDb;
pub use memory::MemoryQuoteStore;
pub use metrics::{get_metrics, init_metrics};
pub use quote_service::QuoteService;
pub use store::{DayRange, QuoteStore};
