//! Machine translation provider trait and utilities
//!
//! The gateway talks to its upstream services only through
//! `MachineTranslator`, so the two HTTP providers, the mock and anything
//! added later are interchangeable.
//!
//! # Example
//!
//! ```ignore
//! use explore_i18n_mt::{MachineTranslator, MyMemoryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MyMemoryProvider::new("https://api.mymemory.translated.net/get", 30)?;
//!     let result = provider.translate("Hello", "en", "mr").await?;
//!     println!("{}", result); // "नमस्कार"
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use async_trait::async_trait;
use explore_i18n::{normalize_language, validate_language};

/// Generic trait for machine translation providers
///
/// Implementations must map HTTP 429 to [`MtError::RateLimited`] so the
/// gateway can tell a rate limit apart from any other failure, and must
/// report an empty translation as an error rather than `Ok("")`.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "en")
    /// * `target_locale` - Target language code (e.g., "mr")
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Get the name of this translation provider
    ///
    /// Used for logging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// - `mr-IN` → `mr`
/// - `EN` → `en`
pub fn normalize_locale(locale: &str) -> String {
    normalize_language(locale)
}

/// Validate that a locale code is in acceptable format
pub fn validate_locale(locale: &str) -> MtResult<()> {
    validate_language(locale).map_err(|e| MtError::InvalidLocale(e.to_string()))
}

/// Treat an empty or whitespace-only provider answer as no result
pub(crate) fn usable_translation(provider: &str, text: Option<&str>) -> MtResult<String> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t.to_string()),
        _ => Err(MtError::ProviderFailure(format!(
            "{} returned no usable result",
            provider
        ))),
    }
}

/// Map a provider's HTTP status onto the error taxonomy
///
/// 429 becomes [`MtError::RateLimited`]; any other non-success status becomes
/// [`MtError::ProviderFailure`] carrying the response body.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> MtResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        Err(MtError::RateLimited(format!("{} ({})", provider, status)))
    } else {
        Err(MtError::ProviderFailure(format!(
            "{} failed ({}): {}",
            provider, status, error_text
        )))
    }
}

/// Build the shared HTTP client used by the providers
pub(crate) fn build_client(timeout_secs: u64) -> MtResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale_with_region() {
        assert_eq!(normalize_locale("mr-IN"), "mr");
        assert_eq!(normalize_locale("en-GB"), "en");
    }

    #[test]
    fn test_normalize_locale_case_insensitive() {
        assert_eq!(normalize_locale("MR"), "mr");
    }

    #[test]
    fn test_validate_locale_invalid_codes() {
        assert!(validate_locale("").is_err());
        assert!(validate_locale("en@invalid").is_err());
        assert!(validate_locale("fr#bad").is_err());
    }

    #[test]
    fn test_validate_locale_error_variant() {
        match validate_locale("mr@IN") {
            Err(MtError::InvalidLocale(msg)) => assert!(msg.contains("mr@IN")),
            _ => panic!("Expected InvalidLocale error"),
        }
    }

    #[test]
    fn test_usable_translation() {
        assert_eq!(usable_translation("X", Some("नमस्कार")).unwrap(), "नमस्कार");
        assert!(matches!(
            usable_translation("X", Some("  ")),
            Err(MtError::ProviderFailure(_))
        ));
        assert!(usable_translation("X", None).is_err());
    }
}
