//! JSON bodies of the `/api/translate` endpoint
//!
//! Shared by the web server and by [`GatewayClient`](crate::client::GatewayClient)
//! so both sides agree on field names.

use serde::{Deserialize, Serialize};

/// Path the gateway is served under
pub const TRANSLATE_PATH: &str = "/api/translate";

/// `POST` body; both fields are optional on the wire so a missing one can be
/// reported as a bad request rather than a parse failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "targetLang", default, skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
}

impl TranslateRequest {
    pub fn new(text: &str, target_lang: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            target_lang: Some(target_lang.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageBody {
    pub text: String,
    #[serde(rename = "targetLang")]
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub method: String,
    pub body: UsageBody,
}

/// Payload of `GET /api/translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResponse {
    pub message: String,
    pub usage: Usage,
}

impl Default for UsageResponse {
    fn default() -> Self {
        Self {
            message: "Explore Maharashtra Translation API".to_string(),
            usage: Usage {
                method: "POST".to_string(),
                body: UsageBody {
                    text: "Hello".to_string(),
                    target_lang: "mr".to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case_target() {
        let body = serde_json::to_value(TranslateRequest::new("Hello", "mr")).unwrap();
        assert_eq!(body, json!({ "text": "Hello", "targetLang": "mr" }));
    }

    #[test]
    fn test_request_fields_may_be_missing() {
        let request: TranslateRequest = serde_json::from_str(r#"{ "targetLang": "mr" }"#).unwrap();
        assert!(request.text.is_none());
        assert_eq!(request.target_lang.as_deref(), Some("mr"));
    }

    #[test]
    fn test_usage_payload_shape() {
        let body = serde_json::to_value(UsageResponse::default()).unwrap();
        assert_eq!(body["usage"]["method"], "POST");
        assert_eq!(body["usage"]["body"]["targetLang"], "mr");
    }
}
