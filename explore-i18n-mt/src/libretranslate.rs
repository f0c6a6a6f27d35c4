//! LibreTranslate provider, the gateway's fallback upstream
//!
//! Unlike MyMemory this is a JSON POST API:
//!
//! ```text
//! POST https://libretranslate.de/translate
//! { "q": "Hello", "source": "en", "target": "mr", "format": "text" }
//! ```
//!
//! answering with `{ "translatedText": "..." }`. Self-hosted instances may
//! require an API key, sent as `api_key` in the body.

use crate::error::{MtError, MtResult};
use crate::translator::{
    MachineTranslator, build_client, check_status, normalize_locale, usable_translation,
    validate_locale,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default public endpoint
pub const LIBRETRANSLATE_URL: &str = "https://libretranslate.de/translate";

#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// LibreTranslate API client
#[derive(Clone)]
pub struct LibreTranslateProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateProvider {
    /// Create a provider for `base_url` with its own HTTP client
    pub fn new(base_url: &str, timeout_secs: u64) -> MtResult<Self> {
        Ok(Self::with_client(base_url, build_client(timeout_secs)?))
    }

    /// Create a provider sharing an existing HTTP client
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: None,
        }
    }

    /// Send `api_key` with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }
}

impl std::fmt::Debug for LibreTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        let source = normalize_locale(source_locale);
        let target = normalize_locale(target_locale);
        let body = LibreTranslateRequest {
            q: text,
            source: &source,
            target: &target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.base_url).json(&body).send().await?;
        let response = check_status(self.provider_name(), response).await?;

        let parsed: LibreTranslateResponse = response.json().await.map_err(|e| {
            MtError::ProviderFailure(format!("Failed to parse LibreTranslate response: {}", e))
        })?;

        usable_translation(self.provider_name(), parsed.translated_text.as_deref())
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}
