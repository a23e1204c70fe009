use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteCategory {
    #[default]
    MentalHealth,
    MensHealth,
    Motivation,
    Resilience,
}

impl QuoteCategory {
    pub const ALL: [QuoteCategory; 4] = [
        QuoteCategory::MentalHealth,
        QuoteCategory::MensHealth,
        QuoteCategory::Motivation,
        QuoteCategory::Resilience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteCategory::MentalHealth => "mental-health",
            QuoteCategory::MensHealth => "mens-health",
            QuoteCategory::Motivation => "motivation",
            QuoteCategory::Resilience => "resilience",
        }
    }
}

impl fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuoteCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid category '{}'. Expected one of: mental-health, mens-health, motivation, resilience",
                    s
                )
            })
    }
}

/// An unsaved quote, as produced by the AI provider or the predefined list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteDraft {
    pub text: String,
    pub author: String,
    pub category: QuoteCategory,
}

/// A quote record as stored in the `quotes` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: QuoteCategory,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub is_daily_quote: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// The featured quote for the day starting at `day_start`.
    pub fn daily(draft: QuoteDraft, day_start: DateTime<Utc>) -> Self {
        Self::build(draft, day_start, true)
    }

    /// An ad-hoc quote added through the admin endpoint, dated now.
    pub fn manual(text: String, author: Option<String>, category: Option<QuoteCategory>) -> Self {
        let draft = QuoteDraft {
            text,
            author: author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            category: category.unwrap_or_default(),
        };
        Self::build(draft, Utc::now(), false)
    }

    fn build(draft: QuoteDraft, date: DateTime<Utc>, is_daily_quote: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            text: draft.text.trim().to_string(),
            author: draft.author,
            category: draft.category,
            date,
            is_daily_quote,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`; called before every write.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
