//! MongoDB-backed quote store.

use super::store::{DayRange, QuoteStore};
use crate::models::Quote;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime, Document},
    options::{ClientOptions, FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Duration;

const QUOTES_COLLECTION: &str = "quotes";

/// Keeps requests from hanging on an unreachable server.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct QuoteDb {
    client: MongoClient,
    db: Database,
}

impl QuoteDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("quote-service".to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        let store = Self { client, db };
        store.health_check().await?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for quote-service");

        // Listing sorts by date
        let date_index = IndexModel::builder()
            .keys(doc! { "date": -1 })
            .options(IndexOptions::builder().name("date_idx".to_string()).build())
            .build();

        self.quotes()
            .create_index(date_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create date index: {}", e);
                AppError::from(e)
            })?;

        // Daily lookup and deletion filter on both fields. Not unique: the
        // daily invariant is enforced by query-then-insert.
        let daily_index = IndexModel::builder()
            .keys(doc! { "date": 1, "isDailyQuote": 1 })
            .options(IndexOptions::builder().name("daily_idx".to_string()).build())
            .build();

        self.quotes()
            .create_index(daily_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create daily index: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn quotes(&self) -> Collection<Quote> {
        self.db.collection(QUOTES_COLLECTION)
    }
}

fn daily_filter(day: DayRange) -> Document {
    doc! {
        "date": {
            "$gte": BsonDateTime::from_millis(day.start.timestamp_millis()),
            "$lt": BsonDateTime::from_millis(day.end.timestamp_millis())
        },
        "isDailyQuote": true
    }
}

#[async_trait]
impl QuoteStore for QuoteDb {
    async fn find_daily(&self, day: DayRange) -> Result<Option<Quote>, AppError> {
        self.quotes()
            .find_one(daily_filter(day), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find daily quote: {}", e);
                AppError::from(e)
            })
    }

    async fn insert(&self, quote: &Quote) -> Result<(), AppError> {
        self.quotes().insert_one(quote, None).await.map_err(|e| {
            tracing::error!(quote_id = %quote.id, "Failed to insert quote: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();

        let cursor = self.quotes().find(doc! {}, options).await.map_err(|e| {
            tracing::error!("Failed to query quotes: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect quotes: {}", e);
            AppError::from(e)
        })
    }

    async fn delete_daily(&self, day: DayRange) -> Result<u64, AppError> {
        let result = self
            .quotes()
            .delete_many(daily_filter(day), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete daily quotes: {}", e);
                AppError::from(e)
            })?;

        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
