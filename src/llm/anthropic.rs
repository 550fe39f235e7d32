// ABOUTME: Anthropic messages-API vision provider implementation
// ABOUTME: Sends base64 image blocks and text prompts, returns raw response text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Anthropic Provider
//!
//! Implementation of [`VisionProvider`] against the Anthropic messages API.
//!
//! ## Configuration
//!
//! Set the `FRIDGE_CHEF_VISION_API_KEY` environment variable. The model can
//! be overridden with `FRIDGE_CHEF_VISION_MODEL`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{prompts, VisionProvider};
use crate::constants::{env_config, limits};
use crate::errors::{AppError, AppResult};

/// Base URL for the Anthropic API
const API_BASE_URL: &str = "https://api.anthropic.com/v1";

/// API version header value required by the messages endpoint
const API_VERSION: &str = "2023-06-01";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Vision provider backed by the Anthropic messages API
#[derive(Debug)]
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    /// Create a provider with an explicit API key and model
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    /// Create a provider from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `FRIDGE_CHEF_VISION_API_KEY` is not set
    pub fn from_env(model: String) -> AppResult<Self> {
        let api_key = std::env::var(env_config::VISION_API_KEY)
            .map_err(|_| AppError::config_missing(env_config::VISION_API_KEY))?;

        Ok(Self::new(api_key, model))
    }

    async fn send(&self, request: &MessagesRequest) -> AppResult<String> {
        let response = self
            .client
            .post(format!("{API_BASE_URL}/messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::external_service("Anthropic", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error_response(status, &body));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::serialization(format!("malformed provider response: {e}")))?;

        let text = parsed
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        debug!(chars = text.len(), "received provider response");
        Ok(text)
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let message = if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
            let error_type = error_response
                .error
                .error_type
                .unwrap_or_else(|| "unknown".to_owned());
            format!("{} - {}", error_type, error_response.error.message)
        } else {
            format!(
                "API error ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )
        };

        // Overload and rate-limit statuses are transient unavailability,
        // not service faults.
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            AppError::external_unavailable("Anthropic", message)
        } else {
            AppError::external_service("Anthropic", message)
        }
    }
}

#[async_trait]
impl VisionProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    #[instrument(skip(self, image_base64), fields(model = %self.model))]
    async fn analyze_image(&self, image_base64: &str, media_type: &str) -> AppResult<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: limits::MAX_ANALYSIS_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Text {
                        text: prompts::image_analysis_prompt().to_owned(),
                    },
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: media_type.to_owned(),
                            data: image_base64.to_owned(),
                        },
                    },
                ],
            }],
        };

        self.send(&request).await
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: limits::MAX_SUGGESTION_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock::Text {
                    text: prompt.to_owned(),
                }],
            }],
        };

        self.send(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_serializes_content_blocks() {
        let request = MessagesRequest {
            model: "test-model".into(),
            max_tokens: 10,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Text {
                        text: "identify".into(),
                    },
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: "image/jpeg".into(),
                            data: "AAAA".into(),
                        },
                    },
                ],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        let blocks = &json["messages"][0]["content"];
        assert_eq!(blocks[0]["type"], "text");
        assert_eq!(blocks[1]["type"], "image");
        assert_eq!(blocks[1]["source"]["media_type"], "image/jpeg");
    }

    #[test]
    fn test_error_response_parsing() {
        use crate::errors::ErrorCode;

        let body = r#"{"error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        let error =
            AnthropicProvider::parse_error_response(reqwest::StatusCode::SERVICE_UNAVAILABLE, body);
        assert!(error.message.contains("overloaded_error"));
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);

        let error = AnthropicProvider::parse_error_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>",
        );
        assert!(error.message.contains("502"));
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_requires_an_api_key() {
        use crate::errors::ErrorCode;

        std::env::remove_var(env_config::VISION_API_KEY);
        let error = AnthropicProvider::from_env("test-model".into()).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
    }
}
