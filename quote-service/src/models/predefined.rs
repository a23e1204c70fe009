//! Built-in quotes served whenever neither the database nor the AI provider
//! can supply one.

use super::quote::{QuoteCategory, QuoteDraft};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct PredefinedQuote {
    pub text: &'static str,
    pub author: &'static str,
    pub category: QuoteCategory,
}

impl PredefinedQuote {
    pub fn to_draft(&self) -> QuoteDraft {
        QuoteDraft {
            text: self.text.to_string(),
            author: self.author.to_string(),
            category: self.category,
        }
    }
}

pub const PREDEFINED_QUOTES: &[PredefinedQuote] = &[
    PredefinedQuote {
        text: "Your mental health is a priority. Your happiness is essential. Your self-care is a necessity.",
        author: "Unknown",
        category: QuoteCategory::MentalHealth,
    },
    PredefinedQuote {
        text: "You don't have to control your thoughts. You just have to stop letting them control you.",
        author: "Dan Millman",
        category: QuoteCategory::MentalHealth,
    },
    PredefinedQuote {
        text: "There is hope, even when your brain tells you there isn't.",
        author: "John Green",
        category: QuoteCategory::MentalHealth,
    },
    PredefinedQuote {
        text: "Asking for help is not a sign of weakness. It takes strength to say you are struggling.",
        author: "Unknown",
        category: QuoteCategory::MensHealth,
    },
    PredefinedQuote {
        text: "Real strength is talking about what hurts instead of carrying it alone.",
        author: "Unknown",
        category: QuoteCategory::MensHealth,
    },
    PredefinedQuote {
        text: "Start where you are. Use what you have. Do what you can.",
        author: "Arthur Ashe",
        category: QuoteCategory::Motivation,
    },
    PredefinedQuote {
        text: "Small steps every day still move you forward.",
        author: "Unknown",
        category: QuoteCategory::Motivation,
    },
    PredefinedQuote {
        text: "Fall seven times, stand up eight.",
        author: "Japanese Proverb",
        category: QuoteCategory::Resilience,
    },
    PredefinedQuote {
        text: "The oak fought the wind and was broken; the willow bent when it must and survived.",
        author: "Robert Jordan",
        category: QuoteCategory::Resilience,
    },
];

/// Uniformly pick one of the built-in quotes.
pub fn random_predefined() -> QuoteDraft {
    let index = rand::thread_rng().gen_range(0..PREDEFINED_QUOTES.len());
    PREDEFINED_QUOTES[index].to_draft()
}
