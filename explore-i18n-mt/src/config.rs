//! Gateway configuration
//!
//! All knobs of the translation gateway live in one struct handed to the
//! gateway constructor. [`GatewayConfig::from_env`] starts from the defaults
//! and overrides them from these environment variables:
//!
//! | variable                       | field                    |
//! |--------------------------------|--------------------------|
//! | `EXPLORE_PRIMARY_URL`          | `primary_provider_url`   |
//! | `EXPLORE_SECONDARY_URL`        | `secondary_provider_url` |
//! | `EXPLORE_SECONDARY_API_KEY`    | `secondary_api_key`      |
//! | `EXPLORE_BACKOFF_MS`           | `rate_limit_backoff_ms`  |
//! | `EXPLORE_MAX_PRIMARY_RETRIES`  | `max_primary_retries`    |
//! | `EXPLORE_SOURCE_LANG`          | `source_language`        |
//! | `EXPLORE_REQUEST_TIMEOUT_SECS` | `request_timeout_secs`   |

use crate::error::{MtError, MtResult};
use crate::libretranslate::LIBRETRANSLATE_URL;
use crate::mymemory::MYMEMORY_URL;
use crate::translator::{normalize_locale, validate_locale};
use explore_i18n::DEFAULT_LANGUAGE;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// MyMemory-compatible GET endpoint
    pub primary_provider_url: String,
    /// LibreTranslate-compatible POST endpoint
    pub secondary_provider_url: String,
    pub secondary_api_key: Option<String>,
    /// Wait before retrying a rate-limited primary call
    pub rate_limit_backoff_ms: u64,
    /// Retries of the primary provider after a rate limit
    pub max_primary_retries: u32,
    /// Language all source text is written in
    pub source_language: String,
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            primary_provider_url: MYMEMORY_URL.to_string(),
            secondary_provider_url: LIBRETRANSLATE_URL.to_string(),
            secondary_api_key: None,
            rate_limit_backoff_ms: 3000,
            max_primary_retries: 1,
            source_language: DEFAULT_LANGUAGE.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("EXPLORE_PRIMARY_URL") {
            config.primary_provider_url = url;
        }
        if let Some(url) = get("EXPLORE_SECONDARY_URL") {
            config.secondary_provider_url = url;
        }
        config.secondary_api_key = get("EXPLORE_SECONDARY_API_KEY");
        if let Some(ms) = get("EXPLORE_BACKOFF_MS") {
            config.rate_limit_backoff_ms = parse_number("EXPLORE_BACKOFF_MS", &ms)?;
        }
        if let Some(n) = get("EXPLORE_MAX_PRIMARY_RETRIES") {
            config.max_primary_retries = parse_number("EXPLORE_MAX_PRIMARY_RETRIES", &n)?;
        }
        if let Some(lang) = get("EXPLORE_SOURCE_LANG") {
            validate_locale(&lang).map_err(|e| {
                MtError::ConfigError(format!("EXPLORE_SOURCE_LANG is not a language code: {}", e))
            })?;
            config.source_language = normalize_locale(&lang);
        }
        if let Some(secs) = get("EXPLORE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_number("EXPLORE_REQUEST_TIMEOUT_SECS", &secs)?;
        }

        Ok(config)
    }

    /// Override the backoff, mostly useful in tests
    pub fn with_backoff_ms(mut self, ms: u64) -> Self {
        self.rate_limit_backoff_ms = ms;
        self
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> MtResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| MtError::ConfigError(format!("{} must be a number ('{}'): {}", name, value, e)))
}
