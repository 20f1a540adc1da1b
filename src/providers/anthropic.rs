/*!
 * Anthropic messages API client.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::cost::TokenUsage;
use crate::errors::ProviderError;

use super::{CompletionRequest, CompletionResponse, Provider};

/// Message in the Anthropic wire format
#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

/// Request body for `/v1/messages`
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    system: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage: AnthropicUsage,
}

/// Anthropic backend client
#[derive(Debug)]
pub struct AnthropicProvider {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (empty means the public API)
    endpoint: String,
}

impl AnthropicProvider {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.anthropic.com/v1/messages".to_string()
        } else {
            format!("{}/v1/messages", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let body = AnthropicRequest {
            model: request.model.clone(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.user_prompt.clone(),
            }],
            system: request.system_prompt.clone(),
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Anthropic API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(error_text),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(error_text)
                }
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let message: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let text: String = message
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect();

        let usage = TokenUsage {
            prompt_tokens: message.usage.input_tokens,
            completion_tokens: message.usage.output_tokens,
        };

        Ok(CompletionResponse { text, usage })
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
