//! The completion seam between the invoker and providers.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single text-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The prepared prompt, templating already done by the caller.
    pub prompt: String,

    /// Optional system prompt.
    pub system: Option<String>,

    /// Sampling temperature override.
    pub temperature: Option<f32>,

    /// Token budget override.
    pub max_tokens: Option<usize>,
}

impl CompletionRequest {
    /// Create a request for a prepared prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set a system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the token budget.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Tokens consumed by the prompt.
    pub input_tokens: usize,
    /// Tokens produced in the completion.
    pub output_tokens: usize,
}

impl UsageMetadata {
    /// Create usage metadata.
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }
}

/// A provider's answer: text, possibly wrapped in markdown, that the
/// caller hopes parses as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The completion text.
    pub text: String,

    /// Which model actually answered, if reported.
    pub model: Option<String>,

    /// Token usage, if reported.
    pub usage: Option<UsageMetadata>,
}

impl CompletionResponse {
    /// Create a response carrying only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            usage: None,
        }
    }
}

/// A text-generation backend.
///
/// Implemented by the HTTP provider clients and by test doubles. One
/// outbound call per `complete` invocation; retry, breaker state, and
/// response interpretation belong to the caller.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate a completion for the request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("parse this")
            .with_system("you are a parser")
            .with_temperature(0.2)
            .with_max_tokens(1000);

        assert_eq!(request.prompt, "parse this");
        assert_eq!(request.system.as_deref(), Some("you are a parser"));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(1000));
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        struct Echo;

        #[async_trait]
        impl CompletionModel for Echo {
            async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
                Ok(CompletionResponse::new(request.prompt))
            }
        }

        let model: Box<dyn CompletionModel> = Box::new(Echo);
        let response = model
            .complete(CompletionRequest::new("hello"))
            .await
            .unwrap();
        assert_eq!(response.text, "hello");
    }
}
