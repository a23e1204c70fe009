use crate::models::Quote;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use service_core::error::AppError;

/// Half-open UTC interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayRange {
    /// The calendar day containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        let midnight = instant.date_naive().and_time(NaiveTime::default());
        let start = Utc.from_utc_datetime(&midnight);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn today() -> Self {
        Self::containing(Utc::now())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Persistence for quote records.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// The daily quote dated within `day`, if one was stored.
    async fn find_daily(&self, day: DayRange) -> Result<Option<Quote>, AppError>;

    async fn insert(&self, quote: &Quote) -> Result<(), AppError>;

    /// Every stored quote, newest `date` first.
    async fn list_all(&self) -> Result<Vec<Quote>, AppError>;

    /// Remove all daily quotes dated within `day`, returning how many were removed.
    async fn delete_daily(&self, day: DayRange) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
