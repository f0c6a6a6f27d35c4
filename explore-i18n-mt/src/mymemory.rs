//! MyMemory provider, the gateway's primary upstream
//!
//! MyMemory exposes a keyless GET endpoint:
//!
//! ```text
//! GET https://api.mymemory.translated.net/get?q=Hello&langpair=en|mr
//! ```
//!
//! answering with `{ "responseData": { "translatedText": "..." }, ... }`.
//! The free tier rate-limits aggressively, which the provider reports as
//! [`MtError::RateLimited`] for the gateway to back off on.

use crate::error::{MtError, MtResult};
use crate::translator::{
    MachineTranslator, build_client, check_status, normalize_locale, usable_translation,
    validate_locale,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Default public endpoint
pub const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// MyMemory translation API client
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryProvider {
    /// Create a provider for `base_url` with its own HTTP client
    pub fn new(base_url: &str, timeout_secs: u64) -> MtResult<Self> {
        Ok(Self::with_client(base_url, build_client(timeout_secs)?))
    }

    /// Create a provider sharing an existing HTTP client
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn request_url(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<reqwest::Url> {
        let langpair = format!(
            "{}|{}",
            normalize_locale(source_locale),
            normalize_locale(target_locale)
        );
        let params = [("q", text), ("langpair", langpair.as_str())];

        reqwest::Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            MtError::ConfigError(format!("Invalid MyMemory URL '{}': {}", self.base_url, e))
        })
    }
}

#[async_trait]
impl MachineTranslator for MyMemoryProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        let url = self.request_url(text, source_locale, target_locale)?;
        debug!("MyMemory request: {}", url);

        let response = self.client.get(url).send().await?;
        let response = check_status(self.provider_name(), response).await?;

        let body: MyMemoryResponse = response.json().await.map_err(|e| {
            MtError::ProviderFailure(format!("Failed to parse MyMemory response: {}", e))
        })?;

        let translated = body.response_data.and_then(|data| data.translated_text);
        usable_translation(self.provider_name(), translated.as_deref())
    }

    fn provider_name(&self) -> &str {
        "MyMemory"
    }
}
