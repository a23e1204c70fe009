//! service-core: Shared infrastructure for the quote service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

