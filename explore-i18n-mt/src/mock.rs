//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, network-free translator for
//! exercising the gateway and overlay without upstream services.
//!
//! # Example
//!
//! ```ignore
//! use explore_i18n_mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "mr").await.unwrap();
//!     assert_eq!(result, "hello_mr");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_mr"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation; unmapped text falls back to Suffix
    Mappings(HashMap<(String, String), String>),

    /// Simulate a provider failure
    Error(String),

    /// Simulate HTTP 429 on every call
    RateLimited,

    /// Play back outcomes in order, one per call; the last one repeats
    Script(Vec<MtResult<String>>),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share the call counter, so a test can keep one handle and give
/// the other to a gateway.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Convenience constructor for [`MockMode::Mappings`]
    pub fn with_mappings<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let map = pairs
            .into_iter()
            .map(|(text, target, translation)| {
                ((text.to_string(), target.to_string()), translation.to_string())
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Number of `translate` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, call: usize, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(MtError::ProviderFailure(msg.clone())),
            MockMode::RateLimited => Err(MtError::RateLimited("mock (429)".to_string())),
            MockMode::Script(outcomes) => match outcomes.get(call).or_else(|| outcomes.last()) {
                Some(outcome) => outcome.clone(),
                None => Err(MtError::Other("Empty mock script".to_string())),
            },
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.apply_translation(call, text, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let result = mock.translate("hello", "en", "mr").await.unwrap();
        assert_eq!(result, "hello_mr");
    }

    #[tokio::test]
    async fn test_mappings_with_fallback() {
        let mock = MockTranslator::with_mappings([("Hello", "mr", "नमस्कार")]);
        assert_eq!(mock.translate("Hello", "en", "mr").await.unwrap(), "नमस्कार");
        assert_eq!(mock.translate("Bye", "en", "mr").await.unwrap(), "Bye_mr");
    }

    #[tokio::test]
    async fn test_error_and_rate_limited_modes() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        assert!(matches!(
            mock.translate("x", "en", "mr").await,
            Err(MtError::ProviderFailure(_))
        ));

        let mock = MockTranslator::new(MockMode::RateLimited);
        assert!(matches!(
            mock.translate("x", "en", "mr").await,
            Err(MtError::RateLimited(_))
        ));
    }

    #[tokio::test]
    async fn test_script_plays_in_order_then_repeats_last() {
        let mock = MockTranslator::new(MockMode::Script(vec![
            Err(MtError::RateLimited("429".to_string())),
            Ok("second".to_string()),
        ]));
        assert!(mock.translate("x", "en", "mr").await.is_err());
        assert_eq!(mock.translate("x", "en", "mr").await.unwrap(), "second");
        assert_eq!(mock.translate("x", "en", "mr").await.unwrap(), "second");
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_script_errors() {
        let mock = MockTranslator::new(MockMode::Script(vec![]));
        assert!(matches!(
            mock.translate("x", "en", "mr").await,
            Err(MtError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_call_counter() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let handle = mock.clone();
        mock.translate("x", "en", "mr").await.unwrap();
        assert_eq!(handle.calls(), 1);
    }

    #[tokio::test]
    async fn test_delay_is_applied() {
        let mock = MockTranslator::with_delay(MockMode::NoOp, 20);
        let start = std::time::Instant::now();
        mock.translate("x", "en", "mr").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
