//! Translation gateway
//!
//! Brokers `(text, target language)` requests to the upstream providers:
//!
//! 1. an exact-pair cache hit is answered without any upstream call;
//! 2. otherwise the primary provider is asked, and a rate-limited answer is
//!    retried after a fixed backoff (once by default);
//! 3. any remaining primary failure, or an empty answer, falls back to the
//!    secondary provider;
//! 4. only when both fail does the caller see an error, and nothing is cached.
//!
//! # Example
//!
//! ```ignore
//! use explore_i18n_mt::{GatewayConfig, TranslationGateway};
//!
//! let gateway = TranslationGateway::from_config(GatewayConfig::from_env()?)?;
//! let text = gateway.translate("Hello", "mr").await?;
//! ```

use crate::cache::TranslationCache;
use crate::config::GatewayConfig;
use crate::error::{MtError, MtResult};
use crate::libretranslate::LibreTranslateProvider;
use crate::mymemory::MyMemoryProvider;
use crate::translator::{MachineTranslator, build_client, validate_locale};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message reported when the request lacks text or a target language
pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Message reported when every upstream provider failed
pub const BOTH_SERVICES_FAILED: &str = "Both translation services failed.";

pub struct TranslationGateway {
    config: GatewayConfig,
    primary: Arc<dyn MachineTranslator>,
    secondary: Arc<dyn MachineTranslator>,
    cache: Arc<TranslationCache>,
}

impl TranslationGateway {
    /// Assemble a gateway from explicit parts
    pub fn new(
        config: GatewayConfig,
        primary: Arc<dyn MachineTranslator>,
        secondary: Arc<dyn MachineTranslator>,
        cache: Arc<TranslationCache>,
    ) -> Self {
        Self {
            config,
            primary,
            secondary,
            cache,
        }
    }

    /// Build the MyMemory → LibreTranslate gateway with a fresh cache
    pub fn from_config(config: GatewayConfig) -> MtResult<Self> {
        let client = build_client(config.request_timeout_secs)?;
        let primary = MyMemoryProvider::with_client(&config.primary_provider_url, client.clone());
        let secondary = LibreTranslateProvider::with_client(&config.secondary_provider_url, client)
            .with_api_key(config.secondary_api_key.clone());

        Ok(Self::new(
            config,
            Arc::new(primary),
            Arc::new(secondary),
            Arc::new(TranslationCache::new()),
        ))
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Translate `text` from the configured source language into `target_language`
    pub async fn translate(&self, text: &str, target_language: &str) -> MtResult<String> {
        if text.trim().is_empty() || target_language.trim().is_empty() {
            return Err(MtError::InvalidRequest(MISSING_PARAMETERS.to_string()));
        }
        validate_locale(target_language)?;

        if let Some(cached) = self.cache.get(text, target_language).await {
            debug!("Cache hit for '{}' ({})", text, target_language);
            return Ok(cached);
        }

        let translated = match self.translate_with_primary(text, target_language).await {
            Ok(translated) => translated,
            Err(primary_err) => {
                info!(
                    "{} failed ({}), falling back to {}",
                    self.primary.provider_name(),
                    primary_err,
                    self.secondary.provider_name()
                );
                self.secondary
                    .translate(text, &self.config.source_language, target_language)
                    .await
                    .map_err(|secondary_err| {
                        error!(
                            "Translation of '{}' into {} failed: {}; {}",
                            text, target_language, primary_err, secondary_err
                        );
                        MtError::UpstreamTranslationFailure(BOTH_SERVICES_FAILED.to_string())
                    })?
            }
        };

        Ok(self.cache.insert(text, target_language, translated).await)
    }

    /// Ask the primary provider, backing off and retrying on rate limits
    async fn translate_with_primary(&self, text: &str, target_language: &str) -> MtResult<String> {
        let mut retries = 0;
        loop {
            match self
                .primary
                .translate(text, &self.config.source_language, target_language)
                .await
            {
                Err(MtError::RateLimited(msg)) if retries < self.config.max_primary_retries => {
                    retries += 1;
                    warn!(
                        "{} rate limit hit ({}), retrying in {}ms",
                        self.primary.provider_name(),
                        msg,
                        self.config.rate_limit_backoff_ms
                    );
                    tokio::time::sleep(self.config.backoff()).await;
                }
                result => return result,
            }
        }
    }
}

impl std::fmt::Debug for TranslationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationGateway")
            .field("config", &self.config)
            .field("primary", &self.primary.provider_name())
            .field("secondary", &self.secondary.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTranslator};
    use crate::test_support::spawn_stub;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gateway_with(
        config: GatewayConfig,
        primary: &MockTranslator,
        secondary: &MockTranslator,
    ) -> TranslationGateway {
        TranslationGateway::new(
            config,
            Arc::new(primary.clone()),
            Arc::new(secondary.clone()),
            Arc::new(TranslationCache::new()),
        )
    }

    fn rate_limited() -> MtResult<String> {
        Err(MtError::RateLimited("429".to_string()))
    }

    #[tokio::test]
    async fn test_repeat_requests_hit_cache() {
        let primary = MockTranslator::with_mappings([("Hello", "mr", "नमस्कार")]);
        let secondary = MockTranslator::new(MockMode::Suffix);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "नमस्कार");
        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "नमस्कार");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);

        // A different language is a different key
        gateway.translate("Hello", "hi").await.unwrap();
        assert_eq!(primary.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_backs_off_then_retries_primary() {
        let primary = MockTranslator::new(MockMode::Script(vec![
            rate_limited(),
            Ok("नमस्कार".to_string()),
        ]));
        let secondary = MockTranslator::new(MockMode::Suffix);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        let start = tokio::time::Instant::now();
        let result = gateway.translate("Hello", "mr").await.unwrap();

        assert_eq!(result, "नमस्कार");
        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 0);
        assert!(start.elapsed() >= std::time::Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_retried_only_once() {
        let primary = MockTranslator::new(MockMode::RateLimited);
        let secondary = MockTranslator::with_mappings([("Hello", "mr", "नमस्ते")]);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "नमस्ते");
        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_retry_when_retries_disabled() {
        let primary = MockTranslator::new(MockMode::RateLimited);
        let secondary = MockTranslator::new(MockMode::Suffix);
        let mut config = GatewayConfig::default();
        config.max_primary_retries = 0;
        let gateway = gateway_with(config, &primary, &secondary);

        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "Hello_mr");
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn test_other_primary_failure_falls_back_without_backoff() {
        let primary = MockTranslator::new(MockMode::Error("500".to_string()));
        let secondary = MockTranslator::new(MockMode::Suffix);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        let start = std::time::Instant::now();
        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "Hello_mr");
        assert!(start.elapsed() < std::time::Duration::from_millis(3000));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert!(gateway.cache().contains("Hello", "mr").await);
    }

    #[tokio::test]
    async fn test_total_failure_is_not_cached() {
        let primary = MockTranslator::new(MockMode::Error("down".to_string()));
        let secondary = MockTranslator::new(MockMode::Error("down".to_string()));
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        match gateway.translate("Hello", "mr").await {
            Err(MtError::UpstreamTranslationFailure(msg)) => {
                assert_eq!(msg, BOTH_SERVICES_FAILED)
            }
            other => panic!("Expected UpstreamTranslationFailure, got {:?}", other),
        }
        assert!(gateway.cache().is_empty().await);

        // The next request goes upstream again
        let _ = gateway.translate("Hello", "mr").await;
        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        let primary = MockTranslator::new(MockMode::Suffix);
        let secondary = MockTranslator::new(MockMode::Suffix);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        let cases = [
            ("", "mr"),
            ("   ", "mr"),
            ("\n\t", "hi"),
            ("Hello", ""),
            ("Hello", "  "),
        ];
        for (text, lang) in cases {
            match gateway.translate(text, lang).await {
                Err(MtError::InvalidRequest(msg)) => assert_eq!(msg, MISSING_PARAMETERS),
                other => panic!("Expected InvalidRequest, got {:?}", other),
            }
        }
        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_target_language() {
        let primary = MockTranslator::new(MockMode::Suffix);
        let secondary = MockTranslator::new(MockMode::Suffix);
        let gateway = gateway_with(GatewayConfig::default(), &primary, &secondary);

        let result = gateway.translate("Hello", "m r").await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
        assert_eq!(primary.calls(), 0);
    }

    // ========== HTTP providers against local stubs ==========

    #[tokio::test]
    async fn test_hello_marathi_end_to_end() {
        let primary = Router::new().route(
            "/get",
            get(|| async { Json(json!({ "responseData": { "translatedText": "नमस्कार" } })) }),
        );
        let primary_base = spawn_stub(primary).await;

        let config = GatewayConfig {
            primary_provider_url: format!("{}/get", primary_base),
            secondary_provider_url: "http://127.0.0.1:9/translate".to_string(),
            request_timeout_secs: 5,
            ..GatewayConfig::default()
        };
        let gateway = TranslationGateway::from_config(config).unwrap();

        assert_eq!(gateway.translate("Hello", "mr").await.unwrap(), "नमस्कार");
        assert_eq!(
            gateway.cache().get("Hello", "mr").await.as_deref(),
            Some("नमस्कार")
        );
    }

    #[tokio::test]
    async fn test_rate_limited_twice_then_secondary_500() {
        let primary_hits = Arc::new(AtomicUsize::new(0));
        let secondary_hits = Arc::new(AtomicUsize::new(0));

        let hits = Arc::clone(&primary_hits);
        let primary = Router::new().route(
            "/get",
            get(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::TOO_MANY_REQUESTS, "quota").into_response()
                }
            }),
        );
        let hits = Arc::clone(&secondary_hits);
        let secondary = Router::new().route(
            "/translate",
            post(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "down").into_response()
                }
            }),
        );
        let primary_base = spawn_stub(primary).await;
        let secondary_base = spawn_stub(secondary).await;

        let config = GatewayConfig {
            primary_provider_url: format!("{}/get", primary_base),
            secondary_provider_url: format!("{}/translate", secondary_base),
            request_timeout_secs: 5,
            ..GatewayConfig::default()
        }
        .with_backoff_ms(10);
        let gateway = TranslationGateway::from_config(config).unwrap();

        let err = gateway.translate("Hello", "mr").await.unwrap_err();
        assert!(!err.to_string().is_empty());
        assert_eq!(err.to_string(), BOTH_SERVICES_FAILED);
        assert_eq!(primary_hits.load(Ordering::SeqCst), 2);
        assert_eq!(secondary_hits.load(Ordering::SeqCst), 1);
        assert!(!gateway.cache().contains("Hello", "mr").await);
    }

    #[test]
    fn test_debug_names_providers() {
        let gateway = TranslationGateway::from_config(GatewayConfig::default()).unwrap();
        let debug_str = format!("{:?}", gateway);
        assert!(debug_str.contains("MyMemory"));
        assert!(debug_str.contains("LibreTranslate"));
    }
}
