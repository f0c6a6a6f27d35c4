//! HTTP client for a remote translation gateway
//!
//! Lets a [`TranslatorOverlay`](crate::overlay::TranslatorOverlay) run in a
//! different process from the gateway, talking to it over
//! `POST /api/translate` exactly like the portal's pages do.

use crate::api::{ErrorResponse, TRANSLATE_PATH, TranslateRequest, TranslateResponse};
use crate::error::{MtError, MtResult};
use crate::overlay::TranslationSource;
use crate::translator::build_client;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GatewayClient {
    /// Client for the gateway served at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: &str, timeout_secs: u64) -> MtResult<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), TRANSLATE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationSource for GatewayClient {
    async fn fetch_translation(&self, text: &str, target_language: &str) -> MtResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TranslateRequest::new(text, target_language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(if status == reqwest::StatusCode::BAD_REQUEST {
                MtError::InvalidRequest(message)
            } else {
                MtError::UpstreamTranslationFailure(format!(
                    "Gateway error ({}): {}",
                    status, message
                ))
            });
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            MtError::Other(format!("Failed to parse gateway response: {}", e))
        })?;

        Ok(parsed
            .translated_text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| text.to_string()))
    }
}
