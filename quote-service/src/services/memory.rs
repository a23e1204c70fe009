//! In-process quote store for tests and database-less local runs.

use super::store::{DayRange, QuoteStore};
use crate::models::Quote;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryQuoteStore {
    quotes: RwLock<Vec<Quote>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail, as if the connection had dropped.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful inserts.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }

    fn check_reads(&self) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "memory store reads disabled"
            )));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "memory store writes disabled"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn find_daily(&self, day: DayRange) -> Result<Option<Quote>, AppError> {
        self.check_reads()?;
        let quotes = self.quotes.read().await;
        Ok(quotes
            .iter()
            .find(|q| q.is_daily_quote && day.contains(q.date))
            .cloned())
    }

    async fn insert(&self, quote: &Quote) -> Result<(), AppError> {
        self.check_writes()?;
        let mut quotes = self.quotes.write().await;
        if quotes.iter().any(|q| q.id == quote.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate quote id {}",
                quote.id
            )));
        }
        quotes.push(quote.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        self.check_reads()?;
        let mut quotes = self.quotes.read().await.clone();
        quotes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(quotes)
    }

    async fn delete_daily(&self, day: DayRange) -> Result<u64, AppError> {
        self.check_writes()?;
        let mut quotes = self.quotes.write().await;
        let before = quotes.len();
        quotes.retain(|q| !(q.is_daily_quote && day.contains(q.date)));
        Ok((before - quotes.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check_reads()
    }
}
