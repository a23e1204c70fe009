use secrecy::SecretString;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Placeholder shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Mixed-case key name used by older `.env` files.
const LEGACY_API_KEY_VAR: &str = "Gemini_API_KEY";

const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub gemini: GeminiSettings,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    /// Absent means the service runs on predefined quotes only.
    pub uri: Option<String>,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub frontend_url: String,
}

impl QuoteConfig {
    pub fn load() -> Result<Self, AppError> {
        let mut common_config = core_config::Config::load()?;
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            common_config.port = port;
        }
        if let Ok(environment) = env::var("ENVIRONMENT") {
            common_config.environment = environment;
        }
        let is_prod = common_config.is_production();

        Ok(QuoteConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_optional_env("MONGODB_URI"),
                database: get_env("MONGODB_DATABASE", Some("quotes_db"), is_prod)?,
            },
            gemini: GeminiSettings {
                api_key: select_api_key(
                    get_optional_env("GEMINI_API_KEY"),
                    get_optional_env(LEGACY_API_KEY_VAR),
                ),
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                timeout_secs: parse_timeout_secs(&get_env(
                    "GEMINI_TIMEOUT_SECS",
                    Some(&DEFAULT_GEMINI_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?)?,
            },
            cors: CorsConfig {
                frontend_url: get_env("FRONTEND_URL", Some("http://localhost:3000"), is_prod)?,
            },
        })
    }

    /// Whether error details such as panic messages may be returned to callers.
    pub fn expose_error_details(&self) -> bool {
        !self.common.is_production()
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

/// `GEMINI_API_KEY` wins over the legacy name; the sample placeholder counts as unset.
fn select_api_key(primary: Option<String>, legacy: Option<String>) -> Option<SecretString> {
    primary
        .or(legacy)
        .filter(|key| key != PLACEHOLDER_API_KEY)
        .map(SecretString::new)
}

fn parse_timeout_secs(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// In production every setting must be given explicitly; elsewhere `default` fills in.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
