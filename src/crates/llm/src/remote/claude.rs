//! Anthropic Claude client implementation.

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::model::{CompletionModel, CompletionRequest, CompletionResponse, UsageMetadata};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl ClaudeClient {
    /// Create a new Claude client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self { config, client })
    }

    fn convert_response(&self, claude_resp: ClaudeResponse) -> CompletionResponse {
        let text = claude_resp
            .content
            .iter()
            .filter_map(|c| {
                if c.content_type == "text" {
                    c.text.clone()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        CompletionResponse {
            text,
            model: Some(claude_resp.model),
            usage: Some(UsageMetadata::new(
                claude_resp.usage.input_tokens,
                claude_resp.usage.output_tokens,
            )),
        }
    }
}

#[async_trait]
impl CompletionModel for ClaudeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!("{}/v1/messages", self.config.base_url);

        let req_body = ClaudeRequest {
            model: self.config.model.clone(),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            system: request.system,
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: Some(request.temperature.unwrap_or(self.config.temperature)),
        };

        debug!(model = %req_body.model, "sending Claude completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&req_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(format!("Claude request exceeded {:?}", self.config.timeout))
                } else {
                    LlmError::HttpError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationError(error_text),
                429 => LlmError::RateLimitExceeded(error_text),
                500..=599 => LlmError::ServiceUnavailable(format!(
                    "Claude API error {}: {}",
                    status, error_text
                )),
                _ => LlmError::ProviderError(format!("Claude API error {}: {}", status, error_text)),
            });
        }

        let claude_resp: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(self.convert_response(claude_resp))
    }
}

// Claude API types
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
    model: String,
    usage: ClaudeUsage,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: usize,
    output_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = RemoteLlmConfig::new(
            "test-key",
            "https://api.anthropic.com",
            "claude-3-5-sonnet-20241022",
        );
        assert!(ClaudeClient::new(config).is_ok());
    }

    #[test]
    fn test_response_conversion_joins_text_segments() {
        let config = RemoteLlmConfig::new(
            "test-key",
            "https://api.anthropic.com",
            "claude-3-5-sonnet-20241022",
        );
        let client = ClaudeClient::new(config).unwrap();

        let claude_resp = ClaudeResponse {
            content: vec![
                ClaudeContent {
                    content_type: "text".to_string(),
                    text: Some("{\"full_name\": ".to_string()),
                },
                ClaudeContent {
                    content_type: "text".to_string(),
                    text: Some("\"Jane Doe\"}".to_string()),
                },
            ],
            model: "claude-3-5-sonnet-20241022".to_string(),
            usage: ClaudeUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        };

        let response = client.convert_response(claude_resp);
        assert_eq!(response.text, "{\"full_name\": \"Jane Doe\"}");
        assert_eq!(response.usage.unwrap().output_tokens, 5);
    }
}
