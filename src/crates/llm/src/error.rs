//! Error types for LLM provider clients.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when calling LLM providers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// API key not found in environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// Provider service unavailable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid response from provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// General provider error.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Check if this error is retryable (transient network conditions).
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LlmError::ServiceUnavailable(_)
            | LlmError::Timeout(_)
            | LlmError::RateLimitExceeded(_) => true,
            _ => false,
        }
    }

    /// Check if this error is fatal configuration: bad or missing
    /// credentials. Retrying these never helps.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_)
                | LlmError::ApiKeyNotFound(_)
                | LlmError::ConfigError(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(LlmError::Timeout("60s elapsed".to_string()).is_retryable());
        assert!(LlmError::ServiceUnavailable("503".to_string()).is_retryable());
        assert!(LlmError::RateLimitExceeded("429".to_string()).is_retryable());
    }

    #[test]
    fn test_auth_errors_are_not_retryable() {
        let err = LlmError::AuthenticationError("401".to_string());
        assert!(!err.is_retryable());
        assert!(err.is_auth_error());

        let err = LlmError::ApiKeyNotFound("ANTHROPIC_API_KEY".to_string());
        assert!(!err.is_retryable());
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_invalid_response_is_neither() {
        let err = LlmError::InvalidResponse("truncated JSON".to_string());
        assert!(!err.is_retryable());
        assert!(!err.is_auth_error());
    }
}
